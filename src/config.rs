//! Driver configuration, supplied once when the driver is created

use crate::{I2C_ADDR_DEFAULT, I2C_BUFFER_SIZE, MAX_TRANSFER_LIMIT};

/// What to do when a single I2C write fails in the middle of a region transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusErrorPolicy {
    /// Log and count the failure, then carry on with the next transfer.
    /// A glitch leaves a few wrong pixels on screen instead of an error.
    #[default]
    Continue,
    /// Log and count the failure, then stop and return it to the caller
    Abort,
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the controller
    pub address: u8,
    /// Upper bound for one I2C write, marker byte included
    pub max_transfer: usize,
    /// Reaction to failed writes
    pub bus_error_policy: BusErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: I2C_ADDR_DEFAULT,
            max_transfer: I2C_BUFFER_SIZE,
            bus_error_policy: BusErrorPolicy::Continue,
        }
    }
}

impl Config {
    /// Use another I2C address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Limit the length of a single I2C write
    pub fn with_max_transfer(mut self, max_transfer: usize) -> Self {
        self.max_transfer = max_transfer;
        self
    }

    /// Choose how failed writes are handled
    pub fn with_bus_error_policy(mut self, policy: BusErrorPolicy) -> Self {
        self.bus_error_policy = policy;
        self
    }

    /// Data bytes that fit in one transfer next to the marker byte
    pub fn max_chunk(&self) -> usize {
        self.max_transfer.saturating_sub(1)
    }

    /// A transfer has to carry the marker and at least one data byte, and
    /// never needs more than one full page.
    pub fn is_valid(&self) -> bool {
        (2..=MAX_TRANSFER_LIMIT).contains(&self.max_transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_module() {
        let config = Config::default();
        assert_eq!(config.address, 0x3C);
        assert_eq!(config.max_transfer, 32);
        assert_eq!(config.max_chunk(), 31);
        assert_eq!(config.bus_error_policy, BusErrorPolicy::Continue);
        assert!(config.is_valid());
    }

    #[test]
    fn transfer_limit_bounds() {
        assert!(!Config::default().with_max_transfer(0).is_valid());
        assert!(!Config::default().with_max_transfer(1).is_valid());
        assert!(Config::default().with_max_transfer(2).is_valid());
        assert!(Config::default().with_max_transfer(129).is_valid());
        assert!(!Config::default().with_max_transfer(130).is_valid());
    }

    #[test]
    fn builder_sets_fields() {
        let config = Config::default()
            .with_address(crate::I2C_ADDR_ALTERNATE)
            .with_bus_error_policy(BusErrorPolicy::Abort);
        assert_eq!(config.address, 0x3D);
        assert_eq!(config.bus_error_policy, BusErrorPolicy::Abort);
    }
}
