//! Benchmarks for field validation.
//!
//! These benchmarks measure the per-keystroke cost of the validators.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paystell::utils::validation::{is_valid_email, is_valid_password, password_strength, PasswordPolicy};

fn bench_email(c: &mut Criterion) {
    c.bench_function("email_valid", |b| {
        b.iter(|| is_valid_email(black_box("first.last+tag@mail.example.com")))
    });
    c.bench_function("email_invalid", |b| {
        b.iter(|| is_valid_email(black_box("first.last@localhost")))
    });
}

fn bench_password(c: &mut Criterion) {
    c.bench_function("password_strict", |b| {
        b.iter(|| is_valid_password(black_box("Secret1!pass"), PasswordPolicy::Strict))
    });
    c.bench_function("password_relaxed", |b| {
        b.iter(|| is_valid_password(black_box("secret pass"), PasswordPolicy::Relaxed))
    });
}

fn bench_strength(c: &mut Criterion) {
    let long = "aB3$".repeat(64);

    c.bench_function("strength_short", |b| b.iter(|| password_strength(black_box("Secret1!"))));
    c.bench_function("strength_long", |b| b.iter(|| password_strength(black_box(&long))));
}

criterion_group!(benches, bench_email, bench_password, bench_strength);
criterion_main!(benches);
