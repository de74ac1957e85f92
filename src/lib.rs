// Copyright 2023-2024 nostr-zaps Developers
// Licensed under the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according to those terms.

//! This crate provides the zap interaction and settlement subsystem of a
//! nostr client: gesture classification (quick zap vs. custom zap),
//! optimistic settlement state gated on a timed animation, and bolt11
//! payment-request decoding with a two-variant presentation.

#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    unused_lifetimes,
    unused_labels,
    unused_extern_crates,
    non_ascii_idents,
    keyword_idents,
    deprecated_in_future,
    unstable_features,
    single_use_lifetimes,
    unreachable_pub,
    missing_docs,
    missing_copy_implementations
)]
#![deny(clippy::string_slice)]

mod error;
pub use error::Error;

#[cfg(test)]
macro_rules! test_serde {
    ($t:ty, $fnname:ident) => {
        #[test]
        fn $fnname() {
            let a = <$t>::mock();
            let x = serde_json::to_string(&a).unwrap();
            println!("{}", x);
            let b = serde_json::from_str(&x).unwrap();
            assert_eq!(a, b);
        }
    };
}

mod types;
pub use types::{
    Account, Invoice, InvoiceSection, MilliSatoshi, Note, NoteId, PublicKeyHex, RelayUrl,
    RepostMenuState, SectionValue, Unixtime, ZapCommit, ZapDefaults, ZapProfile, ZapUiState,
};

mod anim;
pub use anim::{animation_offset, AnimationAsset, AnimationEngine, ZapAnimation};

mod flow;
pub use flow::{commit_zap, InvoicePresentation, NoticeSink, ZapCallbacks, ZapSettler};

mod gesture;
pub use gesture::{GestureOutcome, GesturePhase, QuickZapTimer, ZapGesture, QUICK_ZAP_DELAY};

mod menu;
pub use menu::{PointerEvents, RepostMenu};

mod presenter;
pub use presenter::{InvoiceFooter, InvoicePresenter, InvoiceView};
