// Host-side tests for output device lifecycle decisions.

#![allow(dead_code)]
mod device {
    include!("../src/core/device.rs");
}

use device::*;

#[test]
fn missing_or_closed_device_is_recreated() {
    assert_eq!(acquire_action(None), DeviceAction::Create);
    assert_eq!(acquire_action(Some(DeviceState::Closed)), DeviceAction::Create);
}

#[test]
fn parked_device_is_resumed_and_running_one_reused() {
    assert_eq!(acquire_action(Some(DeviceState::Suspended)), DeviceAction::Resume);
    assert_eq!(acquire_action(Some(DeviceState::Running)), DeviceAction::Use);
}

#[test]
fn suspend_only_an_idle_running_device() {
    assert!(should_suspend(Some(DeviceState::Running), false));
    assert!(!should_suspend(Some(DeviceState::Running), true));
    assert!(!should_suspend(Some(DeviceState::Suspended), false));
    assert!(!should_suspend(Some(DeviceState::Closed), false));
    assert!(!should_suspend(None, false));
}

#[test]
fn music_bus_is_rebuilt_after_the_device_is_replaced() {
    assert!(bus_is_stale(None, 1));
    assert!(!bus_is_stale(Some(1), 1));
    // a cue recreated the closed device while the loop kept running
    assert!(bus_is_stale(Some(1), 2));
}
