// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

thread_local! {
    static MOCK_REGISTERS: RefCell<HashMap<u8, u8>> = RefCell::new(HashMap::new());
    static MOCK_SLAVE_ADDRESS: RefCell<Option<u16>> = const { RefCell::new(None) };
}

pub struct I2c;

impl I2c {
    pub fn new() -> Result<Self> {
        Ok(I2c)
    }

    pub fn set_slave_address(&mut self, address: u16) -> Result<()> {
        MOCK_SLAVE_ADDRESS.with(|addr| *addr.borrow_mut() = Some(address));
        Ok(())
    }

    pub fn smbus_read_byte(&self, register: u8) -> Result<u8> {
        Ok(MOCK_REGISTERS.with(|regs| *regs.borrow().get(&register).unwrap_or(&0)))
    }

    pub fn smbus_write_byte(&self, register: u8, value: u8) -> Result<()> {
        set_mock_register(register, value);
        Ok(())
    }
}

// test helper to set a register value
pub fn set_mock_register(register: u8, value: u8) {
    MOCK_REGISTERS.with(|regs| {
        regs.borrow_mut().insert(register, value);
    });
}

// test helper to load a little endian i16 into a register pair
pub fn set_mock_i16(low_register: u8, value: i16) {
    let [lo, hi] = value.to_le_bytes();
    set_mock_register(low_register, lo);
    set_mock_register(low_register + 1, hi);
}

pub fn get_mock_register(register: u8) -> Option<u8> {
    MOCK_REGISTERS.with(|regs| regs.borrow().get(&register).copied())
}

pub fn get_mock_slave_address() -> Option<u16> {
    MOCK_SLAVE_ADDRESS.with(|addr| *addr.borrow())
}

// test helper to reset the device
pub fn reset_mock_i2c() {
    MOCK_REGISTERS.with(|regs| regs.borrow_mut().clear());
    MOCK_SLAVE_ADDRESS.with(|addr| *addr.borrow_mut() = None);
}
