//! Property-based tests for the token codec
//!
//! Tests that tokens survive serialisation unchanged and that the
//! serialisation of a token without claims is canonical.

use kliento_core::{ClaimSet, Token};
use proptest::prelude::*;

// Strategy: Generate non-empty audiences
fn arb_audience() -> impl Strategy<Value = String> {
    ".{1,64}"
}

// Strategy: Generate claim sets with non-empty keys
fn arb_claims() -> impl Strategy<Value = ClaimSet> {
    prop::collection::btree_map(".{1,16}", ".{0,32}", 0..8)
}

proptest! {
    /// Property: deserialise(serialise(token)) == token
    #[test]
    fn proptest_token_roundtrip(audience in arb_audience(), claims in arb_claims()) {
        let token = Token::with_claims(audience, claims);

        let serialisation = token
            .serialise()
            .expect("Serialisation should succeed for valid tokens");
        let recovered = Token::deserialise(&serialisation)
            .expect("Deserialisation should succeed for serialised tokens");

        prop_assert_eq!(recovered, token);
    }

    /// Property: an empty claim set serialises exactly like no claims
    #[test]
    fn proptest_empty_claims_are_omitted(audience in arb_audience()) {
        let without_claims = Token::new(audience.clone()).serialise().unwrap();
        let with_empty_claims = Token::with_claims(audience, ClaimSet::new())
            .serialise()
            .unwrap();

        prop_assert_eq!(without_claims, with_empty_claims);
    }

    /// Property: arbitrary bytes never panic the decoder
    #[test]
    fn proptest_deserialise_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Token::deserialise(&bytes);
    }
}
