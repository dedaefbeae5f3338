#![no_main]

use ctr_crypto::core::operations::rsa::RsaContext;
use ctr_crypto::RsaKey2048;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary key records must be rejected or accepted, never panic
    if data.len() < 256 + 4 {
        return;
    }
    let mut n = [0u8; 256];
    n.copy_from_slice(&data[..256]);
    let e = &data[256..260];

    let key = RsaKey2048::public(n, e);
    if let Ok(ctx) = RsaContext::init(&key) {
        let mut signature = [0u8; 256];
        let rest = &data[260..];
        let len = rest.len().min(256);
        signature[256 - len..].copy_from_slice(&rest[..len]);
        let _ = ctx.verify_hash(&signature, &[0u8; 32]);
        let _ = ctx.raw_public(&signature);
    }
});
