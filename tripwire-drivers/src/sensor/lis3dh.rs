//! LIS3DH 3-axis accelerometer (I2C)
//!
//! Runs in high-resolution mode at ±2 g full scale. In that mode the
//! left-justified 12-bit output is 1 mg per digit, so a sample converts to
//! milli-g with a single arithmetic shift.

use embedded_hal_async::i2c::I2c;
use tripwire_core::motion::AccelSample;
use tripwire_core::traits::SensorError;

/// Identity register and its fixed value
const REG_WHO_AM_I: u8 = 0x0F;
const WHO_AM_I_VALUE: u8 = 0x33;

const REG_CTRL_REG1: u8 = 0x20;
const REG_CTRL_REG4: u8 = 0x23;
const REG_OUT_X_L: u8 = 0x28;

/// Register address auto-increment flag for multi-byte reads
const AUTO_INCREMENT: u8 = 0x80;

/// CTRL_REG1: X, Y and Z enabled, normal power mode
const CTRL1_XYZ_EN: u8 = 0x07;
/// CTRL_REG4: block data update, high resolution, ±2 g
const CTRL4_BDU_HR_2G: u8 = 0x88;

/// Output data rate (CTRL_REG1 ODR bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    PowerDown = 0x0,
    Hz10 = 0x2,
    Hz25 = 0x3,
    Hz50 = 0x4,
    Hz100 = 0x5,
}

impl DataRate {
    /// Slowest rate that still produces a fresh sample every `interval_ms`
    pub fn for_interval_ms(interval_ms: u32) -> Self {
        match interval_ms {
            0..=10 => DataRate::Hz100,
            11..=20 => DataRate::Hz50,
            21..=40 => DataRate::Hz25,
            _ => DataRate::Hz10,
        }
    }

    fn ctrl_reg1(self) -> u8 {
        match self {
            DataRate::PowerDown => 0x00,
            rate => ((rate as u8) << 4) | CTRL1_XYZ_EN,
        }
    }
}

/// LIS3DH on an async I2C bus
pub struct Lis3dh<I> {
    i2c: I,
    address: u8,
    rate: DataRate,
}

impl<I: I2c> Lis3dh<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            rate: DataRate::PowerDown,
        }
    }

    /// Check the device identity and start sampling at `rate`
    pub async fn init(&mut self, rate: DataRate) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.address, &[REG_WHO_AM_I], &mut id)
            .await
            .map_err(|_| SensorError::NotResponding)?;
        if id[0] != WHO_AM_I_VALUE {
            return Err(SensorError::WrongDevice);
        }

        self.write_register(REG_CTRL_REG4, CTRL4_BDU_HR_2G).await?;
        self.set_rate(rate).await
    }

    /// Change the output data rate
    pub async fn set_rate(&mut self, rate: DataRate) -> Result<(), SensorError> {
        self.write_register(REG_CTRL_REG1, rate.ctrl_reg1()).await?;
        self.rate = rate;
        Ok(())
    }

    /// Stop sampling
    pub async fn power_down(&mut self) -> Result<(), SensorError> {
        self.set_rate(DataRate::PowerDown).await
    }

    pub fn rate(&self) -> DataRate {
        self.rate
    }

    /// Read the latest sample in milli-g
    pub async fn read(&mut self) -> Result<AccelSample, SensorError> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_OUT_X_L | AUTO_INCREMENT], &mut raw)
            .await
            .map_err(|_| SensorError::Bus)?;

        // 12-bit left-justified, 1 mg/digit in HR mode at ±2 g
        let axis = |lo: u8, hi: u8| i16::from_le_bytes([lo, hi]) >> 4;
        Ok(AccelSample::new(
            axis(raw[0], raw[1]),
            axis(raw[2], raw[3]),
            axis(raw[4], raw[5]),
        ))
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(|_| SensorError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    /// Register-file I2C device
    struct MockBus {
        registers: [u8; 0x40],
        writes: Vec<(u8, u8)>,
        present: bool,
    }

    impl MockBus {
        fn new() -> Self {
            let mut registers = [0u8; 0x40];
            registers[REG_WHO_AM_I as usize] = WHO_AM_I_VALUE;
            Self {
                registers,
                writes: Vec::new(),
                present: true,
            }
        }

        fn with_sample(mut self, x: i16, y: i16, z: i16) -> Self {
            for (i, value) in [x, y, z].into_iter().enumerate() {
                let bytes = (value << 4).to_le_bytes();
                self.registers[REG_OUT_X_L as usize + i * 2] = bytes[0];
                self.registers[REG_OUT_X_L as usize + i * 2 + 1] = bytes[1];
            }
            self
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if !self.present || address != 0x19 {
                return Err(ErrorKind::Other);
            }

            let mut pointer = 0usize;
            for operation in operations {
                match operation {
                    Operation::Write(bytes) => {
                        pointer = (bytes[0] & !AUTO_INCREMENT) as usize;
                        if let [register, value] = bytes[..] {
                            self.registers[register as usize] = value;
                            self.writes.push((register, value));
                        }
                    }
                    Operation::Read(buffer) => {
                        for byte in buffer.iter_mut() {
                            *byte = self.registers[pointer];
                            pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_configures_device() {
        let mut sensor = Lis3dh::new(MockBus::new(), 0x19);
        block_on(sensor.init(DataRate::Hz10)).unwrap();

        assert_eq!(sensor.i2c.writes, [(REG_CTRL_REG4, 0x88), (REG_CTRL_REG1, 0x27)]);
        assert_eq!(sensor.rate(), DataRate::Hz10);
    }

    #[test]
    fn test_init_wrong_device() {
        let mut bus = MockBus::new();
        bus.registers[REG_WHO_AM_I as usize] = 0x44;
        let mut sensor = Lis3dh::new(bus, 0x19);
        assert_eq!(block_on(sensor.init(DataRate::Hz10)), Err(SensorError::WrongDevice));
    }

    #[test]
    fn test_init_missing_device() {
        let mut sensor = Lis3dh::new(MockBus::new(), 0x18);
        assert_eq!(block_on(sensor.init(DataRate::Hz10)), Err(SensorError::NotResponding));
    }

    #[test]
    fn test_read_converts_to_milli_g() {
        let bus = MockBus::new().with_sample(-12, 140, 1003);
        let mut sensor = Lis3dh::new(bus, 0x19);
        let sample = block_on(sensor.read()).unwrap();
        assert_eq!(sample, AccelSample::new(-12, 140, 1003));
    }

    #[test]
    fn test_read_bus_error() {
        let mut bus = MockBus::new();
        bus.present = false;
        let mut sensor = Lis3dh::new(bus, 0x19);
        assert_eq!(block_on(sensor.read()), Err(SensorError::Bus));
    }

    #[test]
    fn test_power_down() {
        let mut sensor = Lis3dh::new(MockBus::new(), 0x19);
        block_on(sensor.init(DataRate::Hz50)).unwrap();
        block_on(sensor.power_down()).unwrap();
        assert_eq!(sensor.i2c.registers[REG_CTRL_REG1 as usize], 0x00);
    }

    #[test]
    fn test_rate_for_interval() {
        assert_eq!(DataRate::for_interval_ms(500), DataRate::Hz10);
        assert_eq!(DataRate::for_interval_ms(20), DataRate::Hz50);
        assert_eq!(DataRate::for_interval_ms(5), DataRate::Hz100);
    }
}
