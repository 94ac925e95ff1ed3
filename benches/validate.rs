use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use regform::payload::MultipartPayload;
use regform::{validate, FileUpload, FormValues};

fn filled(zip: &str) -> FormValues {
    FormValues::new()
        .with_text("firstName", "Ana")
        .with_text("middleName", "Maria")
        .with_text("lastName", "Lopez")
        .with_text("birthDate", "1988-11-02")
        .with_text("gender", "Female")
        .with_text("address1", "400 Market St")
        .with_text("city", "Austin")
        .with_text("state", "TX")
        .with_text("zip", zip)
        .with_text("mobile", "+15125550199")
        .with_text("ssn", "123-45-6789")
        .with_text("signature", "Ana Maria Lopez")
        .with_file("idFront", FileUpload::new("front.png", "image/png", vec![0u8; 64 * 1024]))
        .with_file("idBack", FileUpload::new("back.png", "image/png", vec![0u8; 64 * 1024]))
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Elements(1));
    for (label, zip) in [("valid", "73301"), ("zip_mismatch", "ABCDE")] {
        let values = filled(zip);
        group.bench_with_input(BenchmarkId::new("form", label), &values, |b, v| {
            b.iter(|| criterion::black_box(validate(v)));
        });
    }
    group.finish();

    // Payload assembly copies file bytes; keep an eye on it for large scans
    let values = filled("73301");
    c.bench_function("payload_from_values", |b| {
        b.iter(|| criterion::black_box(MultipartPayload::from_values(&values)));
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
