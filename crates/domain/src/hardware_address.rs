use crate::errors::MacAddressParseError;
use std::fmt;
use std::str::FromStr;

/// A six-byte IEEE 802 MAC address.
///
/// Accepts the three common textual layouts:
/// - `aa:bb:cc:dd:ee:ff`
/// - `aa-bb-cc-dd-ee-ff`
/// - `aabb.ccdd.eeff`
///
/// and always renders as lowercase colon-separated octets, which is the key
/// format of the ethers table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Canonical string form of `input`, or `None` when it is not a MAC.
    pub fn canonicalize(input: &str) -> Option<String> {
        input.parse::<MacAddress>().ok().map(|mac| mac.to_string())
    }

    fn parse_separated(s: &str, sep: char) -> Option<[u8; 6]> {
        let mut octets = [0u8; 6];
        let mut count = 0;
        for part in s.split(sep) {
            if count == 6 || part.len() != 2 || !is_hex(part) {
                return None;
            }
            octets[count] = u8::from_str_radix(part, 16).ok()?;
            count += 1;
        }
        (count == 6).then_some(octets)
    }

    fn parse_dotted(s: &str) -> Option<[u8; 6]> {
        let mut octets = [0u8; 6];
        let mut count = 0;
        for group in s.split('.') {
            if count == 6 || group.len() != 4 || !is_hex(group) {
                return None;
            }
            octets[count] = u8::from_str_radix(&group[0..2], 16).ok()?;
            octets[count + 1] = u8::from_str_radix(&group[2..4], 16).ok()?;
            count += 2;
        }
        (count == 6).then_some(octets)
    }
}

// `from_str_radix` alone would let a leading '+' through.
fn is_hex(digits: &str) -> bool {
    digits.bytes().all(|b| b.is_ascii_hexdigit())
}

impl FromStr for MacAddress {
    type Err = MacAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(MacAddressParseError(s.to_string()));
        }

        let octets = match s.len() {
            17 if s.as_bytes()[2] == b':' => Self::parse_separated(s, ':'),
            17 if s.as_bytes()[2] == b'-' => Self::parse_separated(s, '-'),
            14 if s.as_bytes()[4] == b'.' => Self::parse_dotted(s),
            _ => None,
        };

        octets
            .map(MacAddress)
            .ok_or_else(|| MacAddressParseError(s.to_string()))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}
