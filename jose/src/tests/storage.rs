mod value_storage {
    use serde_json::json;

    use crate::{error::Error, storage::ValueStorage};

    #[test]
    fn it_keeps_fields_in_insertion_order() {
        let mut storage = ValueStorage::new();
        storage.set("kty", "OKP");
        storage.set("crv", "Ed25519");
        storage.set("alg", "EdDSA");
        storage.set("crv", "X25519");

        assert_eq!(storage.fields().collect::<Vec<_>>(), ["kty", "crv", "alg"]);
        assert_eq!(
            storage.encode().unwrap(),
            br#"{"kty":"OKP","crv":"X25519","alg":"EdDSA"}"#
        );
    }

    #[test]
    fn it_preserves_unknown_fields_across_round_trips() {
        let encoded = br#"{"kty":"OKP","x-vendor":{"nested":[1,2,3]},"crv":"Ed25519"}"#;
        let storage = ValueStorage::decode(encoded).unwrap();

        assert_eq!(storage.get("x-vendor"), Some(&json!({"nested": [1, 2, 3]})));
        assert_eq!(storage.encode().unwrap(), encoded);
    }

    #[test]
    fn it_refuses_to_decode_anything_but_an_object() {
        let inputs: [&[u8]; 5] = [b"[1,2]", b"\"OKP\"", b"null", b"{\"kty\":", b""];
        for encoded in inputs {
            assert!(matches!(
                ValueStorage::decode(encoded),
                Err(Error::MalformedData { .. })
            ));
        }
    }

    #[test]
    fn it_reads_absent_binary_fields_as_none() {
        let mut storage = ValueStorage::new();
        assert_eq!(storage.get_data("x"), None);

        storage.set_data("x", Some(&b"hello"[..]));
        assert_eq!(storage.get("x"), Some(&json!("aGVsbG8")));
        assert_eq!(storage.get_data("x"), Some(b"hello".to_vec()));

        storage.set_data("x", None);
        assert!(!storage.contains("x"));
    }

    #[test]
    fn it_accepts_padded_binary_fields() {
        let storage = ValueStorage::decode(br#"{"x":"aGVsbG8="}"#).unwrap();
        assert_eq!(storage.get_data("x"), Some(b"hello".to_vec()));
    }

    #[test]
    fn it_reads_mistyped_fields_as_none() {
        let storage = ValueStorage::decode(br#"{"b64":"false","x":12}"#).unwrap();

        assert_eq!(storage.get_typed::<bool>("b64"), None);
        assert_eq!(storage.get_data("x"), None);
    }

    #[test]
    fn it_copies_by_value() {
        let mut original = ValueStorage::new();
        original.set("kid", "one");

        let mut copy = original.clone();
        copy.set("kid", "two");

        assert_eq!(original.get_typed::<String>("kid").as_deref(), Some("one"));
    }
}

mod typed_key_view {
    use crate::{
        jwk::{AnyJsonWebKey, Curve, KeyType, KeyUsage},
        storage::ValueStorage,
    };

    #[test]
    fn it_writes_through_to_storage() {
        let mut key = AnyJsonWebKey::new();
        key.set_key_type(Some(KeyType::OctetKeyPair));
        key.set_curve(Some(Curve::X25519));
        key.set_key_usage(Some(KeyUsage::Encryption));
        key.set_x_coordinate(Some(&[0xfb, 0xff][..]));

        assert_eq!(
            key.as_storage().encode().unwrap(),
            br#"{"kty":"OKP","crv":"X25519","use":"enc","x":"-_8"}"#
        );
    }

    #[test]
    fn it_reads_absent_fields_as_none() {
        let key = AnyJsonWebKey::from(ValueStorage::decode(br#"{"kty":"EC"}"#).unwrap());

        assert_eq!(key.key_type(), Some(KeyType::EllipticCurve));
        assert_eq!(key.curve(), None);
        assert_eq!(key.x_coordinate(), None);
        assert_eq!(key.y_coordinate(), None);
        assert_eq!(key.private_key(), None);
    }

    #[test]
    fn it_strips_private_members() {
        let mut key = AnyJsonWebKey::new();
        key.set_key_type(Some(KeyType::OctetKeyPair));
        key.set_x_coordinate(Some(&[1; 32][..]));
        key.set_private_key(Some(&[2; 32][..]));

        let public = key.public_key();
        assert_eq!(public.x_coordinate(), Some(vec![1; 32]));
        assert_eq!(public.private_key(), None);
        assert_eq!(key.private_key(), Some(vec![2; 32]));
    }

    #[test]
    fn it_parses_curve_names() {
        assert_eq!("P-256".parse::<Curve>().unwrap(), Curve::P256);
        assert_eq!("secp256k1".parse::<Curve>().unwrap(), Curve::Secp256k1);
        assert_eq!(Curve::Ed25519.to_string(), "Ed25519");
        assert_eq!(Curve::P521.key_size(), 66);
        assert_eq!(Curve::X448.key_type(), KeyType::OctetKeyPair);
        assert!("P-257".parse::<Curve>().is_err());
    }
}
