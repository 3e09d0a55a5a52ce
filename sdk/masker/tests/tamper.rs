use num_bigint::BigInt;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use veilshare_field::{FieldElement, SafePrime};
use veilshare_masker::{KeyField, MaskedJar, MaskerError, MaskerOptions, SecretMasker};
use veilshare_threshold::PartyId;
use veilshare_values::{BlobShares, MaskedValue, NamedValues, Value, ValueError, ValueType};

type Bundles = HashMap<PartyId, NamedValues<MaskedValue>>;

fn parties(n: u8) -> Vec<PartyId> {
    (1..=n).map(|i| PartyId::new(vec![i])).collect()
}

fn party(i: u8) -> PartyId {
    PartyId::new(vec![i])
}

fn masked(values: &NamedValues<Value>, masker: &SecretMasker, seed: u64) -> Bundles {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    masker.mask_with_rng(values, &mut rng).unwrap()
}

fn full_jar(masker: &SecretMasker, bundles: Bundles) -> MaskedJar {
    let mut jar = masker.build_jar();
    for (party, bundle) in bundles {
        jar.add_element(party, bundle).unwrap();
    }
    jar
}

fn single(name: &str, value: Value) -> NamedValues<Value> {
    let mut values = NamedValues::new();
    values.insert(name, value);
    values
}

#[test]
fn corrupted_extra_share_is_detected() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let mut bundles = masked(&single("x", Value::SecretInteger(BigInt::from(9))), &masker, 300);

    let bundle = bundles.get_mut(&party(3)).unwrap();
    let tampered = match bundle.get("x") {
        Some(MaskedValue::SecretInteger(share)) => {
            masker.field().add(share, &FieldElement::one())
        }
        other => panic!("unexpected share: {other:?}"),
    };
    bundle.insert("x", MaskedValue::SecretInteger(tampered));

    let err = masker.unmask(full_jar(&masker, bundles)).unwrap_err();
    assert_eq!(
        err,
        MaskerError::Corruption {
            name: "x".into(),
            party: Some(party(3)),
        }
    );
}

#[test]
fn key_shares_interpolating_to_zero_are_corruption() {
    let masker = SecretMasker::new_256_bit_safe_prime(1, parties(3)).unwrap();
    let key = Value::new_ecdsa_private_key([0x5a; 32]).unwrap();
    let bundles = masked(&single("key", key), &masker, 301);

    // With x = 1, 2 the secret is 2*y1 - y2; choosing y2 = 2*y1 makes it zero
    let y1 = match bundles[&party(1)].get("key") {
        Some(MaskedValue::EcdsaPrivateKey(share)) => share.clone(),
        other => panic!("unexpected share: {other:?}"),
    };
    let y2 = masker.ecdsa_key_field().mul(&FieldElement::from(2), &y1);

    let mut jar = masker.build_jar();
    jar.add_element(party(1), bundles[&party(1)].clone()).unwrap();
    let mut second = bundles[&party(2)].clone();
    second.insert("key", MaskedValue::EcdsaPrivateKey(y2));
    jar.add_element(party(2), second).unwrap();

    let err = masker.unmask(jar).unwrap_err();
    assert_eq!(
        err,
        MaskerError::Corruption {
            name: "key".into(),
            party: None,
        }
    );
}

#[test]
fn key_shares_interpolating_to_zero_in_the_masker_field() {
    let options = MaskerOptions {
        eddsa_key_field: KeyField::Masker,
        ..Default::default()
    };
    let masker = SecretMasker::with_options(SafePrime::U256, 1, parties(3), options).unwrap();
    let key = Value::new_eddsa_private_key([0x0b; 32]).unwrap();
    let bundles = masked(&single("key", key), &masker, 309);

    let y1 = match bundles[&party(1)].get("key") {
        Some(MaskedValue::EddsaPrivateKey(share)) => share.clone(),
        other => panic!("unexpected share: {other:?}"),
    };
    let y2 = masker.field().mul(&FieldElement::from(2), &y1);

    let mut jar = masker.build_jar();
    jar.add_element(party(1), bundles[&party(1)].clone()).unwrap();
    let mut second = bundles[&party(2)].clone();
    second.insert("key", MaskedValue::EddsaPrivateKey(y2));
    jar.add_element(party(2), second).unwrap();

    let err = masker.unmask(jar).unwrap_err();
    assert_eq!(
        err,
        MaskerError::Corruption {
            name: "key".into(),
            party: None,
        }
    );
}

#[test]
fn boolean_shares_reconstructing_to_non_bit_are_corruption() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let bundles = masked(&single("flag", Value::SecretBoolean(true)), &masker, 310);

    // With x = 1, 2 the secret is 2*y1 - y2; pick y2 so that it becomes 5
    let y1 = match bundles[&party(1)].get("flag") {
        Some(MaskedValue::SecretBoolean(share)) => share.clone(),
        other => panic!("unexpected share: {other:?}"),
    };
    let field = masker.field();
    let y2 = field.sub(&field.mul(&FieldElement::from(2), &y1), &FieldElement::from(5));

    let mut jar = masker.build_jar();
    jar.add_element(party(1), bundles[&party(1)].clone()).unwrap();
    let mut second = bundles[&party(2)].clone();
    second.insert("flag", MaskedValue::SecretBoolean(y2));
    jar.add_element(party(2), second).unwrap();

    let err = masker.unmask(jar).unwrap_err();
    assert_eq!(
        err,
        MaskerError::Corruption {
            name: "flag".into(),
            party: None,
        }
    );
}

#[test]
fn ill_typed_array_is_rejected_before_masking() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    // Built directly, bypassing the checked constructor
    let array = Value::Array {
        inner_type: ValueType::SecretInteger,
        values: vec![
            Value::SecretInteger(BigInt::from(1)),
            Value::Integer(BigInt::from(2)),
        ],
    };
    let values = single("pair", Value::new_tuple(Value::Boolean(false), array));

    let err = masker.mask(&values).unwrap_err();
    assert_eq!(
        err,
        MaskerError::InvalidValue {
            name: "pair.right[1]".into(),
            source: ValueError::ArrayTypeMismatch {
                index: 1,
                expected: ValueType::SecretInteger,
                found: ValueType::Integer,
            },
        }
    );
}

#[test]
fn diverging_public_value_is_inconsistency() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let mut bundles = masked(&single("n", Value::Integer(BigInt::from(4))), &masker, 302);
    bundles
        .get_mut(&party(2))
        .unwrap()
        .insert("n", MaskedValue::Integer(BigInt::from(5)));

    let err = masker.unmask(full_jar(&masker, bundles)).unwrap_err();
    assert_eq!(
        err,
        MaskerError::Inconsistency {
            name: "n".into(),
            party: party(2),
        }
    );
}

#[test]
fn variant_change_is_type_mismatch() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let mut bundles = masked(&single("x", Value::SecretBoolean(true)), &masker, 303);
    bundles
        .get_mut(&party(3))
        .unwrap()
        .insert("x", MaskedValue::SecretInteger(FieldElement::one()));

    let err = masker.unmask(full_jar(&masker, bundles)).unwrap_err();
    assert!(matches!(
        err,
        MaskerError::TypeMismatch { ref name, ref party, .. } if name == "x" && *party == PartyId::new(vec![3])
    ));
}

#[test]
fn array_length_change_is_type_mismatch_with_path() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let array = Value::new_array(
        ValueType::SecretInteger,
        vec![Value::SecretInteger(BigInt::from(1)); 3],
    )
    .unwrap();
    let mut bundles = masked(&single("arr", Value::new_tuple(Value::Boolean(true), array)), &masker, 304);

    let bundle = bundles.get_mut(&party(2)).unwrap();
    let shortened = match bundle.get("arr") {
        Some(MaskedValue::Tuple { left, right }) => match &**right {
            MaskedValue::Array { inner_type, values } => MaskedValue::new_tuple(
                (**left).clone(),
                MaskedValue::Array {
                    inner_type: inner_type.clone(),
                    values: values[..2].to_vec(),
                },
            ),
            other => panic!("unexpected array: {other:?}"),
        },
        other => panic!("unexpected tuple: {other:?}"),
    };
    bundle.insert("arr", shortened);

    let err = masker.unmask(full_jar(&masker, bundles)).unwrap_err();
    match err {
        MaskerError::TypeMismatch {
            name,
            party: culprit,
            expected,
            found,
        } => {
            assert_eq!(name, "arr.right");
            assert_eq!(culprit, party(2));
            assert_eq!(expected, "Array<SecretInteger; 3>");
            assert_eq!(found, "Array<SecretInteger; 2>");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blob_size_disagreement_is_type_mismatch() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let mut bundles = masked(&single("b", Value::SecretBlob(vec![1u8; 10])), &masker, 305);

    let bundle = bundles.get_mut(&party(1)).unwrap();
    let lied = match bundle.get("b") {
        Some(MaskedValue::SecretBlob(blob)) => MaskedValue::SecretBlob(BlobShares {
            chunks: blob.chunks.clone(),
            original_size: 9,
        }),
        other => panic!("unexpected blob: {other:?}"),
    };
    bundle.insert("b", lied);

    let err = masker.unmask(full_jar(&masker, bundles)).unwrap_err();
    assert!(matches!(err, MaskerError::TypeMismatch { ref name, .. } if name == "b"));
}

#[test]
fn name_missing_from_one_bundle_is_missing_party() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let mut values = single("a", Value::SecretInteger(BigInt::from(1)));
    values.insert("b", Value::SecretInteger(BigInt::from(2)));
    let mut bundles = masked(&values, &masker, 306);
    bundles.get_mut(&party(2)).unwrap().remove("b");

    let err = masker.unmask(full_jar(&masker, bundles)).unwrap_err();
    assert_eq!(
        err,
        MaskerError::MissingParty {
            name: "b".into(),
            party: party(2),
        }
    );
}

#[test]
fn full_roster_can_be_required() {
    let options = MaskerOptions {
        require_full_roster: true,
        ..Default::default()
    };
    let masker = SecretMasker::with_options(SafePrime::U64, 1, parties(3), options).unwrap();
    let bundles = masked(&single("x", Value::SecretBoolean(false)), &masker, 307);

    let mut jar = masker.build_jar();
    jar.add_element(party(1), bundles[&party(1)].clone()).unwrap();
    jar.add_element(party(3), bundles[&party(3)].clone()).unwrap();

    let err = masker.unmask(jar).unwrap_err();
    assert!(matches!(err, MaskerError::MissingParty { ref party, .. } if *party == PartyId::new(vec![2])));
}

#[test]
fn jar_from_another_masker_is_rejected() {
    let ours = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();
    let theirs = SecretMasker::new_64_bit_safe_prime(2, parties(3)).unwrap();
    let bundles = masked(&single("x", Value::SecretBoolean(true)), &theirs, 308);

    let err = ours.unmask(full_jar(&theirs, bundles)).unwrap_err();
    assert_eq!(err, MaskerError::ForeignJar);
}

#[test]
fn out_of_range_inputs_fail_to_mask() {
    let masker = SecretMasker::new_64_bit_safe_prime(1, parties(3)).unwrap();

    let huge = single("big", Value::SecretInteger(BigInt::from(i64::MAX)));
    assert!(matches!(
        masker.mask(&huge),
        Err(MaskerError::Encoding { ref name, .. }) if name == "big"
    ));

    // A 256-bit key never fits the 64-bit field
    let options = MaskerOptions {
        ecdsa_key_field: KeyField::Masker,
        ..Default::default()
    };
    let masker = SecretMasker::with_options(SafePrime::U64, 1, parties(3), options).unwrap();
    let key = single("key", Value::new_ecdsa_private_key([0xee; 32]).unwrap());
    assert!(matches!(
        masker.mask(&key),
        Err(MaskerError::Encoding { ref name, .. }) if name == "key"
    ));

    // Curve order bounds the key even in the widest field
    let masker = SecretMasker::new_256_bit_safe_prime(1, parties(3)).unwrap();
    let key = single("key", Value::EcdsaPrivateKey([0xff; 32]));
    assert!(masker.mask(&key).is_err());
}
