#![no_main]

use ctr_crypto::core::operations::ctr::CtrEngine;
use ctr_crypto::{AesKey, Counter128};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (head, payload) = data.split_at(32);
    let key = AesKey::try_from(&head[..16]).expect("16 bytes");
    let counter: [u8; 16] = head[16..32].try_into().expect("16 bytes");
    let counter = Counter128::from(counter);

    // Stream and in-place paths must agree, and a second pass must undo the first
    let mut engine = CtrEngine::new(&key, counter);
    let mut streamed = vec![0u8; payload.len()];
    engine
        .crypt_stream(Some(payload), &mut streamed)
        .expect("equal lengths");

    let blocks = payload.len().div_ceil(16) as u128;
    assert_eq!(engine.counter(), counter.advanced_by(blocks));

    let mut in_place = payload.to_vec();
    CtrEngine::new(&key, counter).apply_keystream(&mut in_place);
    assert_eq!(streamed, in_place);

    CtrEngine::new(&key, counter).apply_keystream(&mut in_place);
    assert_eq!(in_place, payload);
});
