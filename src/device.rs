use std::convert::TryFrom;
use std::fs::File;
use std::fs::OpenOptions;
use std::os::raw::c_int;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;

use byteorder::BigEndian;
use byteorder::ByteOrder;

use crate::errors::InquiryError;
use crate::errors::PeripheralTypeUnknownError;
use crate::errors::SenseError;
use crate::errors::SenseKeyUnknownError;
use crate::errors::SgError;
use crate::ffi;

/// An open sg device node.
///
/// Holds the opened file so the descriptor is closed on drop. The
/// descriptor itself is only ever forwarded to the native library, never
/// interpreted here.
pub struct SgDevice {
    backing_file: File,
}

/// Peripheral device type from the first inquiry byte (SPC codes).
#[derive(Debug, Clone, PartialEq)]
pub enum PeripheralDeviceType {
    DirectAccess,
    SequentialAccess,
    Printer,
    Processor,
    WriteOnce,
    CdDvd,
    Scanner,
    OpticalMemory,
    MediumChanger,
    Communications,
    StorageArrayController,
    EnclosureServices,
    SimplifiedDirectAccess,
    OpticalCardReader,
    ObjectBasedStorage,
    AutomationDriveInterface,
    WellKnownLogicalUnit,
    NoDevice,
}

impl TryFrom<u8> for PeripheralDeviceType {
    type Error = PeripheralTypeUnknownError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0x00 => PeripheralDeviceType::DirectAccess,
            0x01 => PeripheralDeviceType::SequentialAccess,
            0x02 => PeripheralDeviceType::Printer,
            0x03 => PeripheralDeviceType::Processor,
            0x04 => PeripheralDeviceType::WriteOnce,
            0x05 => PeripheralDeviceType::CdDvd,
            0x06 => PeripheralDeviceType::Scanner,
            0x07 => PeripheralDeviceType::OpticalMemory,
            0x08 => PeripheralDeviceType::MediumChanger,
            0x09 => PeripheralDeviceType::Communications,
            0x0c => PeripheralDeviceType::StorageArrayController,
            0x0d => PeripheralDeviceType::EnclosureServices,
            0x0e => PeripheralDeviceType::SimplifiedDirectAccess,
            0x0f => PeripheralDeviceType::OpticalCardReader,
            0x11 => PeripheralDeviceType::ObjectBasedStorage,
            0x12 => PeripheralDeviceType::AutomationDriveInterface,
            0x1e => PeripheralDeviceType::WellKnownLogicalUnit,
            0x1f => PeripheralDeviceType::NoDevice,
            _ => return Err(PeripheralTypeUnknownError(value)),
        })
    }
}

/// Sense key nibble from fixed-format sense data (SPC).
#[derive(Debug, Clone, PartialEq)]
pub enum SenseKey {
    NoSense,
    RecoveredError,
    NotReady,
    MediumError,
    HardwareError,
    IllegalRequest,
    UnitAttention,
    DataProtect,
    BlankCheck,
    VendorSpecific,
    CopyAborted,
    AbortedCommand,
    VolumeOverflow,
    Miscompare,
    Completed,
}

impl TryFrom<u8> for SenseKey {
    type Error = SenseKeyUnknownError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0x00 => SenseKey::NoSense,
            0x01 => SenseKey::RecoveredError,
            0x02 => SenseKey::NotReady,
            0x03 => SenseKey::MediumError,
            0x04 => SenseKey::HardwareError,
            0x05 => SenseKey::IllegalRequest,
            0x06 => SenseKey::UnitAttention,
            0x07 => SenseKey::DataProtect,
            0x08 => SenseKey::BlankCheck,
            0x09 => SenseKey::VendorSpecific,
            0x0a => SenseKey::CopyAborted,
            0x0b => SenseKey::AbortedCommand,
            0x0d => SenseKey::VolumeOverflow,
            0x0e => SenseKey::Miscompare,
            0x0f => SenseKey::Completed,
            _ => return Err(SenseKeyUnknownError(value)),
        })
    }
}

/// Standard inquiry data.
///
/// | Byte index/indices | Content |
/// | ------------------ | ------- |
/// | 0 (bits 0-4) | Peripheral device type |
/// | 1 (bit 7) | Removable medium |
/// | 2 | ANSI version |
/// | 8-15 | Vendor identification, ASCII space padded |
/// | 16-31 | Product identification, ASCII space padded |
/// | 32-35 | Product revision level, ASCII space padded |
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryData {
    pub peripheral_type: PeripheralDeviceType,
    pub removable: bool,
    pub version: u8,
    pub vendor: String,
    pub product: String,
    pub revision: String,
}

impl InquiryData {
    pub fn parse(resp: &[u8]) -> Result<InquiryData, InquiryError> {
        if resp.len() < 36 {
            return Err(InquiryError::Truncated(resp.len()));
        }

        let peripheral_type = PeripheralDeviceType::try_from(resp[0] & 0x1f)?;

        Ok(InquiryData {
            peripheral_type,
            removable: resp[1] & 0x80 != 0,
            version: resp[2],
            vendor: ascii_field(&resp[8..16]),
            product: ascii_field(&resp[16..32]),
            revision: ascii_field(&resp[32..36]),
        })
    }
}

fn ascii_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

/// READ CAPACITY(10) response: last LBA and block size, both big endian.
///
/// A `last_lba` of `0xFFFF_FFFF` means the capacity does not fit in the
/// 10-byte command and [`SgDevice::read_capacity_16`] is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Capacity {
    pub last_lba: u32,
    pub block_size: u32,
}

impl Capacity {
    fn parse(resp: &[u8; 8]) -> Capacity {
        Capacity {
            last_lba: BigEndian::read_u32(&resp[0..4]),
            block_size: BigEndian::read_u32(&resp[4..8]),
        }
    }

    pub fn total_bytes(&self) -> u64 {
        (u64::from(self.last_lba) + 1) * u64::from(self.block_size)
    }
}

/// READ CAPACITY(16) response.
#[derive(Debug, Clone, PartialEq)]
pub struct Capacity16 {
    pub last_lba: u64,
    pub block_size: u32,
    /// Logical blocks per physical block, as a power of two exponent.
    pub lb_per_pb_exponent: u8,
}

impl Capacity16 {
    fn parse(resp: &[u8; 32]) -> Capacity16 {
        Capacity16 {
            last_lba: BigEndian::read_u64(&resp[0..8]),
            block_size: BigEndian::read_u32(&resp[8..12]),
            lb_per_pb_exponent: resp[13] & 0x0f,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        (self.last_lba + 1) * u64::from(self.block_size)
    }
}

/// Fixed-format sense data (response codes 0x70 and 0x71).
#[derive(Debug, Clone, PartialEq)]
pub struct SenseData {
    pub key: SenseKey,
    pub asc: u8,
    pub ascq: u8,
    /// Set for response code 0x71, deferred errors.
    pub deferred: bool,
}

impl SenseData {
    pub fn parse(resp: &[u8]) -> Result<SenseData, SenseError> {
        if resp.len() < 14 {
            return Err(SenseError::Truncated(resp.len()));
        }

        let code = resp[0] & 0x7f;
        if code != 0x70 && code != 0x71 {
            return Err(SenseError::Format(code));
        }

        Ok(SenseData {
            key: SenseKey::try_from(resp[2] & 0x0f)?,
            asc: resp[12],
            ascq: resp[13],
            deferred: code == 0x71,
        })
    }
}

impl SgDevice {
    /// Open the device node at the given path, read only and non-blocking,
    /// the way the sg tools open devices they only send commands to.
    ///
    /// Example:
    /// ```ignore
    /// let dev = sgutils::SgDevice::open("/dev/sg0")?;
    /// ```
    pub fn open(device_path: &str) -> std::io::Result<SgDevice> {
        let backing_file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(device_path)?;

        Ok(SgDevice { backing_file })
    }

    fn fd(&self) -> c_int {
        self.backing_file.as_raw_fd() as c_int
    }

    /// TEST UNIT READY; `Ok` means the unit is ready.
    pub fn test_unit_ready(&self) -> Result<(), SgError> {
        ffi::test_unit_ready(self.fd())
    }

    /// Fetch standard inquiry data.
    pub fn inquiry(&self) -> Result<InquiryData, InquiryError> {
        let mut resp = [0u8; 96];
        let len = resp.len();
        ffi::inquiry(self.fd(), false, false, 0, &mut resp, len)?;
        InquiryData::parse(&resp)
    }

    /// READ CAPACITY(10) with PMI clear and LBA zero.
    pub fn read_capacity(&self) -> Result<Capacity, SgError> {
        let mut resp = [0u8; 8];
        let len = resp.len();
        ffi::readcap_10(self.fd(), false, 0, &mut resp, len)?;
        Ok(Capacity::parse(&resp))
    }

    /// READ CAPACITY(16), needed when the 10-byte variant saturates.
    pub fn read_capacity_16(&self) -> Result<Capacity16, SgError> {
        let mut resp = [0u8; 32];
        let len = resp.len();
        ffi::readcap_16(self.fd(), false, 0, &mut resp, len)?;
        Ok(Capacity16::parse(&resp))
    }

    /// REQUEST SENSE, fixed format.
    pub fn request_sense(&self) -> Result<SenseData, SenseError> {
        let mut resp = [0u8; 32];
        let len = resp.len();
        ffi::request_sense(self.fd(), false, &mut resp, len)?;
        SenseData::parse(&resp)
    }

    /// SEND DIAGNOSTIC with a diagnostic page as the parameter list
    /// (PF bit set).
    pub fn send_diagnostic(&self, page: &[u8]) -> Result<(), SgError> {
        ffi::send_diag(
            self.fd(),
            0,
            true,
            false,
            false,
            false,
            false,
            page,
            page.len(),
        )
    }

    /// SEND DIAGNOSTIC requesting the default self test (SELF-TEST bit,
    /// no parameter list).
    pub fn default_self_test(&self) -> Result<(), SgError> {
        ffi::send_diag(self.fd(), 0, false, true, false, false, false, &[], 0)
    }
}
