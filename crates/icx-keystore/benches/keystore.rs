use secrecy::SecretString;

use icx_keystore::{AddressDeriver, Kdf, Keystore, PrivateKey, ScryptCost, ScryptParams};

struct FixedAddress;

impl AddressDeriver for FixedAddress {
    fn derive_address(&self, _key: &PrivateKey) -> String {
        "hx0000000000000000000000000000000000000000".to_string()
    }
}

#[divan::bench(args = [1024, 4096, 16384])]
fn bench_scrypt_derive(bencher: divan::Bencher, n: u32) {
    let password = SecretString::from("bench-password");
    let kdf = Kdf::Scrypt(ScryptParams {
        dklen: 32,
        salt: hex::encode([0x5au8; 32]),
        n,
        r: 8,
        p: 1,
    });
    bencher.bench(|| divan::black_box(&kdf).derive(divan::black_box(&password)).unwrap());
}

#[divan::bench]
fn bench_seal_open_light(bencher: divan::Bencher) {
    let password = SecretString::from("bench-password");
    let key = PrivateKey::from_bytes([0x01; 32]);
    let cost = ScryptCost { n: 1024, r: 8, p: 1 };
    bencher.bench(|| {
        let keystore =
            Keystore::seal_with_cost(&key, &password, &FixedAddress, &cost).unwrap();
        divan::black_box(keystore.open(&password).unwrap())
    });
}

fn main() {
    divan::main();
}
