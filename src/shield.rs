use log::info;

/// Countdown that keeps the shield up. Active exactly while ticks remain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShieldTimer {
    remaining_ticks: u32,
}

impl ShieldTimer {
    pub fn new() -> Self {
        ShieldTimer { remaining_ticks: 0 }
    }

    pub fn activate(&mut self, duration_ticks: u32) {
        self.remaining_ticks = duration_ticks;
        info!("Shield activated for {} ticks", duration_ticks);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    pub fn reset(&mut self) {
        self.remaining_ticks = 0;
    }

    /// Counts down one tick. Returns true on the tick the shield drops.
    pub fn tick(&mut self) -> bool {
        if self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            info!("Shield expired");
            return true;
        }
        false
    }
}
