use bittag::{Decoder, FieldValue};
use num_bigint::BigUint;
use proptest::prelude::*;

proptest! {
    #[test]
    fn uri_fields_round_trip(
        widths in prop::collection::vec(1usize..100, 1..6),
        seed in prop::collection::vec(any::<u8>(), 64),
    ) {
        let decoder = Decoder::new("example.com", "2024-06-01", &widths).unwrap();
        let data = &seed[..decoder.bit_length().div_ceil(8)];
        let tag = decoder.decode(data).unwrap();
        let uri = tag.uri();

        let fields = decoder.fields(&uri).unwrap();
        prop_assert_eq!(fields.len(), widths.len());

        for (i, (field, &width)) in fields.iter().zip(&widths).enumerate() {
            let value: BigUint = field.parse().unwrap();
            prop_assert!(value.bits() <= width as u64);
            prop_assert_eq!(&value, &tag.field(i).unwrap().to_biguint());

            let fixed = matches!(tag.field(i), Some(FieldValue::FixedWidth(_)));
            prop_assert_eq!(fixed, width <= 64);
        }
    }

    #[test]
    fn hex_field_matches_value(width in 1usize..128, seed in prop::collection::vec(any::<u8>(), 16)) {
        let decoder = Decoder::new("example.com", "2024-06-01", &[width]).unwrap();
        let tag = decoder.decode(&seed).unwrap();

        let hex = tag.hex_field(0, 32).unwrap();
        prop_assert_eq!(hex.len(), 32);
        prop_assert_eq!(
            BigUint::parse_bytes(hex.as_bytes(), 16).unwrap(),
            tag.field(0).unwrap().to_biguint()
        );
    }
}
