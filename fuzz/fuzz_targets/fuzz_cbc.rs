#![no_main]

use ctr_crypto::{AesKey, CryptoContext, CryptoError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (head, payload) = data.split_at(32);
    let key = AesKey::try_from(&head[..16]).expect("16 bytes");
    let iv: [u8; 16] = head[16..32].try_into().expect("16 bytes");

    let mut ctx = CryptoContext::new();
    ctx.init_cbc_encrypt(&key, iv);
    let mut ciphertext = vec![0u8; payload.len()];
    let result = ctx.encrypt_cbc(payload, &mut ciphertext);

    if payload.len() % 16 != 0 {
        assert_eq!(result, Err(CryptoError::InvalidInputSize));
        return;
    }
    result.expect("aligned input");

    ctx.init_cbc_decrypt(&key, iv);
    let mut decrypted = vec![0u8; payload.len()];
    ctx.decrypt_cbc(&ciphertext, &mut decrypted)
        .expect("aligned input");
    assert_eq!(decrypted, payload);
});
