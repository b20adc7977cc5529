//! Radio initialisation table
//!
//! After every reset the driver writes these values before configuring a
//! modem. They replace the power-on defaults that are wrong for this board
//! family (LNA gain, RX trigger, sync word, DIO mapping...).

/// Modem page a register belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modem {
    Fsk,
    LoRa,
}

/// One register write of the initialisation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterInit {
    /// Modem that must be selected while writing
    pub modem: Modem,
    pub address: u8,
    pub value: u8,
}

const fn fsk(address: u8, value: u8) -> RegisterInit {
    RegisterInit {
        modem: Modem::Fsk,
        address,
        value,
    }
}

/// Initialisation sequence for SX1276 based boards, in write order
pub const RADIO_INIT_REGISTERS: [RegisterInit; 16] = [
    fsk(0x0C, 0x23), // RegLna
    fsk(0x0D, 0x1E), // RegRxConfig
    fsk(0x0E, 0xD2), // RegRssiConfig
    fsk(0x1A, 0x01), // RegAfcFei
    fsk(0x1F, 0xAA), // RegPreambleDetect
    fsk(0x24, 0x07), // RegOsc
    fsk(0x27, 0x12), // RegSyncConfig
    fsk(0x28, 0xC1), // RegSyncValue1
    fsk(0x29, 0x94), // RegSyncValue2
    fsk(0x2A, 0xC1), // RegSyncValue3
    fsk(0x30, 0xD8), // RegPacketConfig1
    fsk(0x35, 0x8F), // RegFifoThresh
    fsk(0x3B, 0x02), // RegImageCal
    fsk(0x40, 0x00), // RegDioMapping1
    fsk(0x41, 0x30), // RegDioMapping2
    RegisterInit {
        modem: Modem::LoRa,
        address: 0x23, // RegPayloadMaxLength
        value: 0x40,
    },
];
