use embassy_time::Duration;
use embus_driver::i2c::{Address, BusError, I2cBus, Message};
use embus_fm24cl64b::{Config, Eeprom, Error, Fm24cl64b, CAPACITY, PAGE_SIZE};
use futures_executor::block_on;

fn fast_config(max_retries: u8) -> Config {
    let mut config = Config::default();
    config.max_retries = max_retries;
    config.retry_backoff = Duration::from_micros(10);
    config
}

/// Records every transmission attempt; optionally refuses the first `nacks`.
struct RecordingBus {
    sent: Vec<(u8, Vec<u8>)>,
    nacks: usize,
    receive_data: Vec<u8>,
}

impl RecordingBus {
    fn new() -> Self {
        Self {
            sent: Vec::new(),
            nacks: 0,
            receive_data: Vec::new(),
        }
    }
}

impl I2cBus for RecordingBus {
    async fn send<const N: usize>(&mut self, message: &Message<N>) -> Result<(), BusError> {
        self.sent
            .push((message.address().into_u8(), message.to_vec()));
        if self.nacks > 0 {
            self.nacks -= 1;
            return Err(BusError::NoAck);
        }
        Ok(())
    }

    async fn receive(&mut self, _address: Address, buffer: &mut [u8]) -> Result<(), BusError> {
        buffer.copy_from_slice(&self.receive_data[..buffer.len()]);
        Ok(())
    }
}

/// Behavioral device model: 8 KiB of memory behind an address pointer.
struct MemoryBus {
    mem: Vec<u8>,
    pointer: usize,
}

impl MemoryBus {
    fn new() -> Self {
        Self {
            mem: vec![0; CAPACITY],
            pointer: 0,
        }
    }
}

impl I2cBus for MemoryBus {
    async fn send<const N: usize>(&mut self, message: &Message<N>) -> Result<(), BusError> {
        let (addr, data) = message.split_at(2);
        self.pointer = usize::from(u16::from_be_bytes([addr[0], addr[1]]));
        for byte in data {
            self.mem[self.pointer] = *byte;
            self.pointer = (self.pointer + 1) % CAPACITY;
        }
        Ok(())
    }

    async fn receive(&mut self, _address: Address, buffer: &mut [u8]) -> Result<(), BusError> {
        for slot in buffer.iter_mut() {
            *slot = self.mem[self.pointer];
            self.pointer = (self.pointer + 1) % CAPACITY;
        }
        Ok(())
    }
}

fn mem_addr(payload: &[u8]) -> u16 {
    u16::from_be_bytes([payload[0], payload[1]])
}

#[test]
fn test_write_splits_at_page_boundaries() {
    let mut bus = RecordingBus::new();
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    let data: Vec<u8> = (0..80).collect();
    block_on(eeprom.write(0, &data)).unwrap();

    assert_eq!(bus.sent.len(), 3);
    let mut expected_addr = 0;
    for (_, payload) in &bus.sent {
        assert!(payload.len() <= 2 + PAGE_SIZE);
        assert_eq!(mem_addr(payload), expected_addr);
        expected_addr += (payload.len() - 2) as u16;
    }
    assert_eq!(expected_addr, 80);
}

#[test]
fn test_unaligned_write_aligns_first_chunk() {
    let mut bus = RecordingBus::new();
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    let data = [0xaa; 48];
    block_on(eeprom.write(16, &data)).unwrap();

    // 16 bytes up to the page boundary, then one full page
    assert_eq!(bus.sent.len(), 2);
    assert_eq!(mem_addr(&bus.sent[0].1), 16);
    assert_eq!(bus.sent[0].1.len(), 2 + 16);
    assert_eq!(mem_addr(&bus.sent[1].1), 32);
    assert_eq!(bus.sent[1].1.len(), 2 + 32);
}

#[test]
fn test_out_of_range_never_touches_bus() {
    let mut bus = RecordingBus::new();
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    assert_eq!(block_on(eeprom.write(0x2000, &[1])), Err(Error::OutOfRange));
    assert_eq!(
        block_on(eeprom.write(0x1fff, &[1, 2])),
        Err(Error::OutOfRange)
    );

    let mut buffer = [0; 2];
    assert_eq!(
        block_on(eeprom.read(0x1fff, &mut buffer)),
        Err(Error::OutOfRange)
    );

    assert!(bus.sent.is_empty());
}

#[test]
fn test_nack_retry_then_success() {
    let mut bus = RecordingBus::new();
    bus.nacks = 3;
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    block_on(eeprom.write(0, &[0x42])).unwrap();

    // three refused attempts plus the accepted one, all identical
    assert_eq!(bus.sent.len(), 4);
    assert!(bus.sent.iter().all(|(_, payload)| payload == &bus.sent[0].1));
}

#[test]
fn test_persistent_nack_reports_device_busy() {
    let mut bus = RecordingBus::new();
    bus.nacks = usize::MAX;
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    assert_eq!(
        block_on(eeprom.write(0, &[0x42])),
        Err(Error::Bus(BusError::DeviceBusy))
    );
    assert_eq!(bus.sent.len(), 5);
}

#[test]
fn test_other_bus_errors_propagate_without_retry() {
    struct TimeoutBus {
        attempts: usize,
    }

    impl I2cBus for TimeoutBus {
        async fn send<const N: usize>(&mut self, _message: &Message<N>) -> Result<(), BusError> {
            self.attempts += 1;
            Err(BusError::BusTimeout)
        }

        async fn receive(&mut self, _address: Address, _buffer: &mut [u8]) -> Result<(), BusError> {
            unreachable!()
        }
    }

    let mut bus = TimeoutBus { attempts: 0 };
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    assert_eq!(
        block_on(eeprom.write(0, &[0x42])),
        Err(Error::Bus(BusError::BusTimeout))
    );
    assert_eq!(bus.attempts, 1);
}

#[test]
fn test_read_sets_address_pointer() {
    let mut bus = RecordingBus::new();
    bus.receive_data = vec![0xca, 0xfe, 0xba, 0xbe];
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    let mut buffer = [0; 4];
    block_on(eeprom.read(0x0123, &mut buffer)).unwrap();

    assert_eq!(bus.sent.len(), 1);
    assert_eq!(bus.sent[0].1, [0x01, 0x23]);
    assert_eq!(buffer, [0xca, 0xfe, 0xba, 0xbe]);
}

#[test]
fn test_select_bits_resolve_distinct_chips() {
    let mut bus = RecordingBus::new();

    for select in 0..8 {
        let mut eeprom = Fm24cl64b::new(&mut bus, select, fast_config(5));
        block_on(eeprom.write(0, &[select])).unwrap();
    }

    for (select, (addr, _)) in bus.sent.iter().enumerate() {
        assert_eq!(*addr, 0b101_0000 | select as u8);
    }
}

#[test]
fn test_round_trip_through_device_model() {
    let mut bus = MemoryBus::new();
    let mut eeprom = Fm24cl64b::new(&mut bus, 0, fast_config(5));

    let data: Vec<u8> = (0..70).map(|i| i as u8 ^ 0x5a).collect();
    block_on(eeprom.write(30, &data)).unwrap();

    let mut readback = [0; 70];
    block_on(eeprom.read(30, &mut readback)).unwrap();
    assert_eq!(readback, data[..]);

    // sequential read continues where the previous one stopped
    block_on(eeprom.write(100, &[1, 2, 3, 4])).unwrap();
    let mut head = [0; 2];
    block_on(eeprom.read(100, &mut head)).unwrap();
    let mut tail = [0; 2];
    block_on(eeprom.read_current(&mut tail)).unwrap();
    assert_eq!(head, [1, 2]);
    assert_eq!(tail, [3, 4]);
}
