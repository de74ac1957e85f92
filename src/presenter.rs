use crate::types::{Invoice, Unixtime};
use tracing::{event, Level};

/// What the invoice dialog renders: the scannable payload, the derived
/// fields, and the footer when this presenter has one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvoiceView {
    /// The payload for the scannable code, scheme-prefixed
    pub code_payload: String,

    /// The invoice description, possibly empty
    pub description: String,

    /// The human-facing amount, e.g. "5 sats"
    pub amount: String,

    /// The settlement footer; `None` for the bare presentation
    pub footer: Option<InvoiceFooter>,
}

/// The settlement footer: expiry countdown plus the pay action
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvoiceFooter {
    /// Human-readable expiry, e.g. "expires in 10 minutes"
    pub expires: String,

    /// The pay action is available
    pub can_pay: bool,
}

/// A reactive view of "current invoice", shown inside a scannable-code
/// dialog.
///
/// There is exactly one implementation for both presentation variants; the
/// bare variant is the same presenter with the footer suppressed, so the
/// two can never diverge in decode behavior. Whenever the payment request
/// changes the decoded invoice is replaced wholesale, never patched, so a
/// view can never mix fields of two payment requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvoicePresenter {
    payment_request: Option<String>,
    invoice: Invoice,
    has_footer: bool,
}

impl InvoicePresenter {
    /// The primary presentation: expiry countdown and pay action included
    pub fn new() -> InvoicePresenter {
        InvoicePresenter {
            payment_request: None,
            invoice: Invoice::empty(),
            has_footer: true,
        }
    }

    /// The bare presentation: same decoding, no footer
    pub fn without_footer() -> InvoicePresenter {
        InvoicePresenter {
            has_footer: false,
            ..InvoicePresenter::new()
        }
    }

    /// Whether this presenter renders the settlement footer
    pub fn has_footer(&self) -> bool {
        self.has_footer
    }

    /// The currently decoded invoice
    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Swap in a new payment request and re-decode.
    ///
    /// An absent or empty input resets to the canonical empty invoice. A
    /// malformed input is logged and also renders as the empty invoice;
    /// decoding problems never escape the presenter.
    pub fn set_payment_request(&mut self, raw: Option<&str>) {
        match raw {
            None | Some("") => {
                self.payment_request = None;
                self.invoice = Invoice::empty();
            }
            Some(raw) => {
                self.payment_request = Some(raw.to_owned());
                self.invoice = match Invoice::decode(raw) {
                    Ok(invoice) => invoice,
                    Err(e) => {
                        event!(Level::WARN, "undecodable payment request: {e}");
                        Invoice::empty()
                    }
                };
            }
        }
    }

    /// Render the current invoice
    pub fn view(&self, now: Unixtime) -> InvoiceView {
        InvoiceView {
            code_payload: format!(
                "lightning:{}",
                self.payment_request.as_deref().unwrap_or("")
            ),
            description: self.invoice.description().to_owned(),
            amount: self.invoice.amount_display(),
            footer: self.has_footer.then(|| InvoiceFooter {
                expires: expiry_label(self.invoice.expires_at(), now),
                can_pay: true,
            }),
        }
    }
}

impl Default for InvoicePresenter {
    fn default() -> Self {
        InvoicePresenter::new()
    }
}

// "expires <relative>", with a safe fallback when the invoice carries no
// usable expiry.
fn expiry_label(expires_at: Option<Unixtime>, now: Unixtime) -> String {
    match expires_at {
        Some(at) => format!("expires {}", relative_future(now, at)),
        None => "expires at an unknown time".to_owned(),
    }
}

// A coarse relative-future phrase, largest sensible unit
fn relative_future(now: Unixtime, then: Unixtime) -> String {
    let seconds = then.0 - now.0;
    if seconds <= 0 {
        return "now".to_owned();
    }

    let (count, unit) = if seconds < 60 {
        (seconds, "second")
    } else if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else {
        (seconds / 86_400, "day")
    };

    if count == 1 {
        format!("in 1 {unit}")
    } else {
        format!("in {count} {unit}s")
    }
}
