use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use filmrental_auth::{PermissionTable, Role, TokenCodec, TokenType};

const SECRET: &str = "12345678901234567890123456789012";

fn bench_mint(c: &mut Criterion) {
    let codec = TokenCodec::new(SECRET).unwrap();
    let role = Role::ADMIN;

    c.bench_function("token_mint_access", |b| {
        b.iter(|| {
            codec
                .mint(black_box("testuser"), &role, Duration::minutes(15), TokenType::Access)
                .unwrap()
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let codec = TokenCodec::new(SECRET).unwrap();
    let token = codec
        .mint("testuser", &Role::ADMIN, Duration::minutes(15), TokenType::Access)
        .unwrap();
    let forged = format!("{}x", token);

    let mut group = c.benchmark_group("token_verify");
    group.bench_function("valid", |b| {
        b.iter(|| codec.verify(black_box(&token), TokenType::Access).unwrap())
    });
    group.bench_function("bad_signature", |b| {
        b.iter(|| codec.verify(black_box(&forged), TokenType::Access).unwrap_err())
    });
    group.finish();
}

fn bench_permission_lookup(c: &mut Criterion) {
    let table = PermissionTable::with_defaults();

    c.bench_function("permission_lookup", |b| {
        b.iter(|| {
            (
                table.has_permission(black_box("admin"), black_box("film:create")),
                table.has_permission(black_box("user"), black_box("film:create")),
                table.has_permission(black_box("ghost"), black_box("film:read")),
            )
        })
    });
}

criterion_group!(benches, bench_mint, bench_verify, bench_permission_lookup);
criterion_main!(benches);
