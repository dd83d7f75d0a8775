/// Packages carried over from the previous day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayState {
    pub leftover_locker: u32,
    pub leftover_home: u32,
}

impl DayState {
    pub fn new(leftover_locker: u32, leftover_home: u32) -> Self {
        Self {
            leftover_locker,
            leftover_home,
        }
    }

    /// Locker packages once today's locker arrivals are added. Saturates at
    /// `u32::MAX` on runs that never empty the lockers.
    pub fn locker_packages_with(&self, new_packages_locker: u32) -> u32 {
        self.leftover_locker.saturating_add(new_packages_locker)
    }

    /// Everything still waiting from yesterday, saturating at `u32::MAX`.
    pub fn carried_packages(&self) -> u32 {
        self.leftover_locker.saturating_add(self.leftover_home)
    }
}

/// Everything that happened during one simulated day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayOutcome {
    pub new_packages_home: u32,
    pub new_packages_locker: u32,
    /// Carried-over plus new locker packages.
    pub locker_packages: u32,
    pub possible_pickups: u32,
    pub not_delivered_locker: u32,
    pub taken_by_self_collection: u32,
    pub cost_professional: f64,
    pub cost_compensation: f64,
    pub next_day_locker_leftover: u32,
    pub next_day_home_leftover: u32,
}

impl DayOutcome {
    pub fn new_packages(&self) -> u32 {
        self.new_packages_home + self.new_packages_locker
    }

    pub fn next_state(&self) -> DayState {
        DayState::new(self.next_day_locker_leftover, self.next_day_home_leftover)
    }
}
