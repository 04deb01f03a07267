// Output device lifecycle decisions.
//
// The web layer owns the actual `AudioContext`; this module only decides what
// to do with it, so the policy can be exercised without a browser.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    Running,
    Suspended,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceAction {
    /// No usable device: create one (and resume it, autoplay may start it suspended).
    Create,
    /// Device exists but is parked.
    Resume,
    Use,
}

/// What to do before handing the device to a cue or the music loop.
pub fn acquire_action(state: Option<DeviceState>) -> DeviceAction {
    match state {
        None | Some(DeviceState::Closed) => DeviceAction::Create,
        Some(DeviceState::Suspended) => DeviceAction::Resume,
        Some(DeviceState::Running) => DeviceAction::Use,
    }
}

/// The deferred post-stop suspend only fires on a running, idle device.
pub fn should_suspend(state: Option<DeviceState>, music_playing: bool) -> bool {
    !music_playing && state == Some(DeviceState::Running)
}

/// Nodes built for an older device cannot be connected to the current one.
pub fn bus_is_stale(bus_epoch: Option<u32>, device_epoch: u32) -> bool {
    bus_epoch != Some(device_epoch)
}
