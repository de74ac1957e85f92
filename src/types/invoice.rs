use super::{MilliSatoshi, Unixtime};
use crate::Error;
use serde::{Deserialize, Serialize};

// BOLT11 tagged field types we surface as named sections
const TAG_PAYMENT_HASH: u8 = 1;
const TAG_EXPIRY: u8 = 6;
const TAG_DESCRIPTION: u8 = 13;
const TAG_PAYMENT_SECRET: u8 = 16;
const TAG_MIN_FINAL_CLTV_EXPIRY: u8 = 24;

// A bolt11 signature is 512 bits plus a recovery id: 104 five-bit groups
const SIGNATURE_GROUPS: usize = 104;

// The timestamp is the first 35 bits of the data part
const TIMESTAMP_GROUPS: usize = 7;

/// The value of one named invoice section
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionValue {
    /// A string-valued section (amount, description, hashes)
    String(String),

    /// A numeric section (timestamp, expiry)
    Number(u64),
}

impl SectionValue {
    /// The string value, if this section is string-valued
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SectionValue::String(s) => Some(s),
            SectionValue::Number(_) => None,
        }
    }

    /// The numeric value, if this section is numeric
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            SectionValue::String(_) => None,
            SectionValue::Number(n) => Some(*n),
        }
    }
}

/// One named section of a decoded payment request
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InvoiceSection {
    /// The section name
    pub name: String,

    /// The section value
    pub value: SectionValue,
}

/// A decoded bolt11-style payment request: an ordered sequence of named
/// sections, unique by name, in encoding order.
///
/// An `Invoice` is always replaced wholesale when the input string changes;
/// sections are never patched individually, so derived values can never mix
/// fields of two different payment requests.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Invoice {
    /// The decoded sections
    pub sections: Vec<InvoiceSection>,
}

impl Invoice {
    /// The canonical empty invoice: no sections, zero amount, unknown expiry
    pub fn empty() -> Invoice {
        Invoice::default()
    }

    /// Decode a payment request string.
    ///
    /// An absent or empty input yields the canonical empty invoice, never an
    /// error. A malformed non-empty input is an `Error::InvalidInvoice`
    /// boundary error; callers that render invoices should fall back to the
    /// empty invoice instead of propagating it.
    pub fn decode(raw: &str) -> Result<Invoice, Error> {
        if raw.is_empty() {
            return Ok(Invoice::empty());
        }

        let (hrp, data, _variant) = bech32::decode(raw)?;
        let hrp = hrp.to_lowercase();
        if !hrp.starts_with("ln") {
            return Err(Error::InvalidInvoice(format!(
                "not a lightning invoice hrp: {hrp}"
            )));
        }
        if data.len() < TIMESTAMP_GROUPS + SIGNATURE_GROUPS {
            return Err(Error::InvalidInvoice(
                "data part too short for timestamp and signature".to_owned(),
            ));
        }

        let mut invoice = Invoice::empty();

        if let Some(msat) = amount_msat_from_hrp(&hrp)? {
            invoice.push_section("amount", SectionValue::String(msat.to_string()));
        }

        let timestamp = fold_number(&data[..TIMESTAMP_GROUPS]);
        invoice.push_section("timestamp", SectionValue::Number(timestamp));

        let tagged_end = data.len() - SIGNATURE_GROUPS;
        let mut pos = TIMESTAMP_GROUPS;
        while pos + 3 <= tagged_end {
            let tag = data[pos].to_u8();
            let len = (data[pos + 1].to_u8() as usize) * 32 + data[pos + 2].to_u8() as usize;
            pos += 3;
            if pos + len > tagged_end {
                return Err(Error::InvalidInvoice(format!(
                    "tagged field {tag} overruns the data part"
                )));
            }
            let payload = &data[pos..pos + len];
            pos += len;

            match tag {
                TAG_PAYMENT_HASH => {
                    let bytes = bech32::convert_bits(payload, 5, 8, false)?;
                    invoice.push_section("payment_hash", SectionValue::String(hex::encode(bytes)));
                }
                TAG_EXPIRY => {
                    invoice.push_section("expiry", SectionValue::Number(fold_number(payload)));
                }
                TAG_DESCRIPTION => {
                    let bytes = bech32::convert_bits(payload, 5, 8, false)?;
                    let text = String::from_utf8(bytes)?;
                    invoice.push_section("description", SectionValue::String(text));
                }
                TAG_PAYMENT_SECRET => {
                    let bytes = bech32::convert_bits(payload, 5, 8, false)?;
                    invoice
                        .push_section("payment_secret", SectionValue::String(hex::encode(bytes)));
                }
                TAG_MIN_FINAL_CLTV_EXPIRY => {
                    invoice.push_section(
                        "min_final_cltv_expiry",
                        SectionValue::Number(fold_number(payload)),
                    );
                }
                // other tagged fields are not consumed by anything we present
                _ => {}
            }
        }

        let signature = bech32::convert_bits(&data[tagged_end..], 5, 8, false)?;
        invoice.push_section("signature", SectionValue::String(hex::encode(signature)));

        Ok(invoice)
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&SectionValue> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.value)
    }

    /// The invoiced amount in millisatoshi, zero if no amount section
    pub fn amount_msat(&self) -> MilliSatoshi {
        let msat = self
            .section("amount")
            .and_then(|v| v.as_str())
            .unwrap_or("0")
            .parse::<u64>()
            .unwrap_or(0);
        MilliSatoshi(msat)
    }

    /// The invoiced amount as a human-facing sats string, e.g. "5,000 sats"
    pub fn amount_display(&self) -> String {
        format!("{} sats", humanize_number(self.amount_msat().to_sats()))
    }

    /// The absolute expiry instant: timestamp + expiry. `None` when either
    /// section is absent ("unknown expiry"); never a panic.
    pub fn expires_at(&self) -> Option<Unixtime> {
        let expiry = self.section("expiry")?.as_u64()?;
        let timestamp = self.section("timestamp")?.as_u64()?;
        Some(Unixtime(timestamp as i64) + expiry as i64)
    }

    /// The invoice description, empty if none was encoded
    pub fn description(&self) -> &str {
        self.section("description")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    // Insertion order is encoding order; sections are unique by name and
    // the first occurrence wins.
    fn push_section(&mut self, name: &str, value: SectionValue) {
        if self.section(name).is_none() {
            self.sections.push(InvoiceSection {
                name: name.to_owned(),
                value,
            });
        }
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> Invoice {
        Invoice {
            sections: vec![
                InvoiceSection {
                    name: "amount".to_owned(),
                    value: SectionValue::String("5000".to_owned()),
                },
                InvoiceSection {
                    name: "timestamp".to_owned(),
                    value: SectionValue::Number(1000),
                },
                InvoiceSection {
                    name: "description".to_owned(),
                    value: SectionValue::String("coffee".to_owned()),
                },
                InvoiceSection {
                    name: "expiry".to_owned(),
                    value: SectionValue::Number(600),
                },
            ],
        }
    }
}

// Big-endian interpretation of a run of 5-bit groups
fn fold_number(groups: &[bech32::u5]) -> u64 {
    groups.iter().fold(0u64, |acc, g| {
        acc.wrapping_mul(32).wrapping_add(g.to_u8() as u64)
    })
}

// The amount is encoded in the hrp after the currency prefix, as digits
// plus an optional multiplier. One bitcoin is 10^11 millisatoshi.
fn amount_msat_from_hrp(hrp: &str) -> Result<Option<u64>, Error> {
    let after_ln = match hrp.strip_prefix("ln") {
        Some(rest) => rest,
        None => return Ok(None),
    };
    let digits_at = match after_ln.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return Ok(None), // no amount part at all
    };
    let amount_part = match after_ln.get(digits_at..) {
        Some(p) => p,
        None => return Ok(None),
    };

    let (digits, multiplier) = match amount_part.chars().last() {
        Some(c) if c.is_ascii_digit() => (amount_part, None),
        Some(c) => match amount_part.get(..amount_part.len() - c.len_utf8()) {
            Some(d) => (d, Some(c)),
            None => return Ok(None),
        },
        None => return Ok(None),
    };
    let units = digits.parse::<u64>()?;

    let msat = match multiplier {
        None => units.checked_mul(100_000_000_000),
        Some('m') => units.checked_mul(100_000_000),
        Some('u') => units.checked_mul(100_000),
        Some('n') => units.checked_mul(100),
        Some('p') => {
            if units % 10 != 0 {
                return Err(Error::InvalidInvoice(
                    "pico-bitcoin amount is not a whole millisatoshi".to_owned(),
                ));
            }
            Some(units / 10)
        }
        Some(other) => {
            return Err(Error::InvalidInvoice(format!(
                "unknown amount multiplier: {other}"
            )));
        }
    };

    match msat {
        Some(msat) => Ok(Some(msat)),
        None => Err(Error::InvalidInvoice("amount overflows".to_owned())),
    }
}

// Thousands separators, the way counters are shown in the client
fn humanize_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
