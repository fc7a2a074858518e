use crate::domain::ports::{Channel, ChannelOpener, ChannelSettings};
use crate::utils::error::{BadgeError, Result};
use serialport::{DataBits, Parity, SerialPort, SerialPortInfo, SerialPortType, StopBits};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

/// USB vendor id of the WCH CH340 bridge used by the reader.
const CH340_VID: u16 = 0x1a86;

/// Reader channel over a real serial port.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    timeout: Duration,
}

impl Channel for SerialChannel {
    fn write_command(&mut self, command: &[u8]) -> io::Result<()> {
        self.port.write_all(command)?;
        self.port.flush()
    }

    fn read_frame(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        let deadline = Instant::now() + self.timeout;

        while filled < len && Instant::now() < deadline {
            match self.port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        buf.truncate(filled);
        Ok(buf)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SerialOpener;

impl ChannelOpener for SerialOpener {
    fn open(&self, port: &str, settings: &ChannelSettings) -> io::Result<Box<dyn Channel>> {
        let data_bits = match settings.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            _ => DataBits::Eight,
        };
        let stop_bits = if settings.stop_bits == 2 {
            StopBits::Two
        } else {
            StopBits::One
        };
        let parity = if settings.parity {
            Parity::Even
        } else {
            Parity::None
        };

        let opened = serialport::new(port, settings.baud_rate)
            .data_bits(data_bits)
            .parity(parity)
            .stop_bits(stop_bits)
            .timeout(settings.read_timeout)
            .open()?;

        Ok(Box::new(SerialChannel {
            port: opened,
            timeout: settings.read_timeout,
        }))
    }
}

/// Serial ports that look like the reader's USB bridge, by device path.
pub fn list_reader_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports().map_err(|e| BadgeError::Io(io::Error::from(e)))?;
    let linux = cfg!(target_os = "linux");

    let mut names: Vec<String> = ports
        .iter()
        .filter(|info| is_reader_port(info, linux))
        .map(|info| info.port_name.clone())
        .collect();
    names.sort();
    tracing::debug!("Reader ports: {:?}", names);
    Ok(names)
}

fn is_reader_port(info: &SerialPortInfo, linux: bool) -> bool {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => {
            matches_reader(&info.port_name, usb.product.as_deref(), Some(usb.vid), linux)
        }
        _ => matches_reader(&info.port_name, None, None, linux),
    }
}

/// Linux names the bridge `ttyUSB*`; elsewhere only the USB description
/// tells a CH340 apart from other COM ports.
fn matches_reader(port_name: &str, product: Option<&str>, vid: Option<u16>, linux: bool) -> bool {
    if linux {
        return port_name.to_lowercase().contains("usb");
    }
    vid == Some(CH340_VID)
        || product
            .map(|p| p.to_lowercase().contains("ch340"))
            .unwrap_or(false)
}
