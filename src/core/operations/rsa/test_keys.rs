//! Shared 2048-bit key for unit tests, generated once per test binary.

use std::sync::OnceLock;

use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::RsaPrivateKey;

use super::encoding::i2osp;
use crate::core::types::RsaKey2048;

static KEY: OnceLock<(RsaPrivateKey, RsaKey2048)> = OnceLock::new();

fn generate() -> (RsaPrivateKey, RsaKey2048) {
    let mut rng = rand::thread_rng();
    let key = RsaPrivateKey::new(&mut rng, 2048).expect("key generation");

    let mut record = RsaKey2048::invalid();
    record.n = i2osp(key.n()).expect("n fits");
    record.e = key.e().to_bytes_be();
    record.d = i2osp(key.d()).expect("d fits");
    record.p = i2osp(&key.primes()[0]).expect("p fits");
    record.q = i2osp(&key.primes()[1]).expect("q fits");
    record.dp = i2osp(key.dp().expect("dp precomputed")).expect("dp fits");
    record.dq = i2osp(key.dq().expect("dq precomputed")).expect("dq fits");
    record.qp = i2osp(&key.crt_coefficient().expect("qinv precomputed")).expect("qp fits");
    record.valid = true;

    (key, record)
}

pub(crate) fn reference_key() -> &'static RsaPrivateKey {
    &KEY.get_or_init(generate).0
}

pub(crate) fn reference_record() -> &'static RsaKey2048 {
    &KEY.get_or_init(generate).1
}
