//! DCC (Direct Client-to-Client) request parsing.
//!
//! DCC requests arrive as `DCC <type> <args>` CTCP payloads. Addresses may be
//! sent as a decimal integer (the IPv4 address in network byte order), a
//! textual IP address, or a hostname.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// The address a DCC peer asks us to connect to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DccAddress {
    /// A numeric or textual IP address.
    Ip(IpAddr),
    /// Anything else, passed through unchanged.
    Host(String),
}

impl DccAddress {
    /// Parse a DCC address field.
    ///
    /// Returns `None` for a decimal value that does not fit in 32 bits.
    ///
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr};
    /// use slirc_support::ctcp::dcc::DccAddress;
    ///
    /// assert_eq!(
    ///     DccAddress::parse("3232246293"),
    ///     Some(DccAddress::Ip(IpAddr::V4(Ipv4Addr::new(192, 168, 42, 21))))
    /// );
    /// ```
    pub fn parse(field: &str) -> Option<Self> {
        if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
            let n: u32 = field.parse().ok()?;
            return Some(Self::Ip(IpAddr::V4(Ipv4Addr::from(n))));
        }
        Some(match field.parse::<IpAddr>() {
            Ok(ip) => Self::Ip(ip),
            Err(_) => Self::Host(field.to_string()),
        })
    }

    /// The IP address, if this is one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Ip(ip) => Some(*ip),
            Self::Host(_) => None,
        }
    }
}

impl fmt::Display for DccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => write!(f, "{}", ip),
            Self::Host(host) => f.write_str(host),
        }
    }
}

/// The typed fields of a DCC request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DccRequest {
    /// `DCC CHAT <protocol> <address> <port>`
    Chat {
        /// Where to connect.
        address: DccAddress,
        /// Port to connect to.
        port: u16,
    },
    /// `DCC SEND <filename> <address> <port> <size>`
    Send {
        /// The offered file's name.
        filename: PathBuf,
        /// Where to connect.
        address: DccAddress,
        /// Port to connect to.
        port: u16,
        /// File size in bytes.
        size: u64,
    },
    /// `DCC ACCEPT <filename> <port> <position>`
    Accept {
        /// The file being resumed.
        filename: PathBuf,
        /// Port of the transfer.
        port: u16,
        /// Byte offset to resume from.
        position: u64,
    },
    /// `DCC RESUME <filename> <port> <position>`
    Resume {
        /// The file being resumed.
        filename: PathBuf,
        /// Port of the transfer.
        port: u16,
        /// Byte offset to resume from.
        position: u64,
    },
    /// A DCC type without typed fields; see the raw arguments.
    Other,
}

/// Parse the arguments of a DCC request of type `dcc_type`.
///
/// The type is matched case-insensitively. Unknown types yield
/// [`DccRequest::Other`]. Returns `None` when a known type's fields are
/// missing or malformed.
///
/// ```
/// use std::path::PathBuf;
/// use slirc_support::ctcp::dcc::{parse_dcc, DccRequest};
///
/// let req = parse_dcc("ACCEPT", "\"foo and bar.txt\" 12345 1000").unwrap();
/// assert_eq!(
///     req,
///     DccRequest::Accept {
///         filename: PathBuf::from("foo and bar.txt"),
///         port: 12345,
///         position: 1000,
///     }
/// );
/// ```
pub fn parse_dcc(dcc_type: &str, args: &str) -> Option<DccRequest> {
    match dcc_type.to_ascii_uppercase().as_str() {
        "CHAT" => {
            let (_protocol, rest) = split_filename(args)?;
            let mut fields = rest.split_whitespace();
            let address = DccAddress::parse(fields.next()?)?;
            let port = parse_decimal(fields.next()?)?;
            Some(DccRequest::Chat { address, port })
        }
        "SEND" => {
            let (filename, rest) = split_filename(args)?;
            let mut fields = rest.split_whitespace();
            let address = DccAddress::parse(fields.next()?)?;
            let port = parse_decimal(fields.next()?)?;
            let size = parse_decimal(fields.next()?)?;
            Some(DccRequest::Send {
                filename: PathBuf::from(filename),
                address,
                port,
                size,
            })
        }
        kind @ ("ACCEPT" | "RESUME") => {
            let (filename, rest) = split_filename(args)?;
            let mut fields = rest.split_whitespace();
            let port = parse_decimal(fields.next()?)?;
            let position = parse_decimal(fields.next()?)?;
            let filename = PathBuf::from(filename);
            Some(if kind == "ACCEPT" {
                DccRequest::Accept {
                    filename,
                    port,
                    position,
                }
            } else {
                DccRequest::Resume {
                    filename,
                    port,
                    position,
                }
            })
        }
        _ => Some(DccRequest::Other),
    }
}

/// Split off the leading filename field, unquoting it if needed.
///
/// Returns the filename and the remaining text, which must be non-empty and
/// separated from the filename by at least one space.
fn split_filename(args: &str) -> Option<(String, &str)> {
    let (filename, rest) = match args.strip_prefix('"') {
        Some(quoted) => {
            let end = closing_quote(quoted)?;
            (unquote(&quoted[..end]), &quoted[end + 1..])
        }
        None => {
            let end = args.find(' ')?;
            (args[..end].to_string(), &args[end..])
        }
    };

    let trimmed = rest.trim_start_matches(' ');
    if trimmed.len() == rest.len() || trimmed.is_empty() || filename.is_empty() {
        return None;
    }
    Some((filename, trimmed))
}

/// Index of the first `"` in `s` not escaped by a backslash.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

fn unquote(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('\\', Some(next @ ('"' | '\\'))) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn parse_decimal<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
