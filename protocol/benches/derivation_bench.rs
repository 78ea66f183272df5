// Derivation benchmarks for keyseed identities.
//
// Covers seed decoding, key derivation for both seed generations,
// phrase encoding/decoding and account-number parsing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use keyseed_protocol::config::{Network, SeedVersion};
use keyseed_protocol::identity::{AccountIdentity, AccountNumber};
use keyseed_protocol::mnemonic::{entropy_to_words, words_to_entropy, Locale};
use keyseed_protocol::seed::Seed;

fn bench_seed_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed/decode");
    for version in [SeedVersion::V1, SeedVersion::V2] {
        let text = Seed::generate(version, Network::Main).encode();
        group.bench_with_input(BenchmarkId::from_parameter(version), &text, |b, text| {
            b.iter(|| Seed::from_encoded(text));
        });
    }
    group.finish();
}

fn bench_key_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed/derive_keys");
    for version in [SeedVersion::V1, SeedVersion::V2] {
        let seed = Seed::generate(version, Network::Main);
        group.bench_with_input(BenchmarkId::from_parameter(version), &seed, |b, seed| {
            b.iter(|| (seed.auth_keypair(), seed.enc_keypair()));
        });
    }
    group.finish();
}

fn bench_phrase(c: &mut Criterion) {
    let seed = Seed::generate(SeedVersion::V2, Network::Main);
    let entropy = seed.entropy();
    let words = entropy_to_words(&entropy, Locale::English).expect("33-byte entropy");

    c.bench_function("mnemonic/encode_24", |b| {
        b.iter(|| entropy_to_words(&entropy, Locale::English));
    });
    c.bench_function("mnemonic/decode_24", |b| {
        b.iter(|| words_to_entropy(&words));
    });
}

fn bench_account_number(c: &mut Criterion) {
    let identity = AccountIdentity::create(Network::Main);
    let text = identity.account_number().encode();

    c.bench_function("account_number/parse", |b| {
        b.iter(|| AccountNumber::parse(&text));
    });
    c.bench_function("identity/from_encoded_seed", |b| {
        let seed = identity.encoded_seed();
        b.iter(|| AccountIdentity::from_encoded_seed(&seed));
    });
}

criterion_group!(
    benches,
    bench_seed_decode,
    bench_key_derivation,
    bench_phrase,
    bench_account_number
);
criterion_main!(benches);
