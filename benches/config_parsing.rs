//! Benchmark for config parsing performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;
use strokewatch::config::StrokewatchConfig;

fn bench_config_load_from_file(c: &mut Criterion) {
    let config_path = Path::new("strokewatch.example.toml");

    c.bench_function("config_parse_from_file", |b| {
        b.iter(|| {
            let config = StrokewatchConfig::load(Some(black_box(config_path)));
            black_box(config)
        });
    });
}

fn bench_config_load_defaults(c: &mut Criterion) {
    c.bench_function("config_parse_defaults_only", |b| {
        b.iter(|| {
            let config = StrokewatchConfig::load(None);
            black_box(config)
        });
    });
}

fn bench_config_toml_parsing(c: &mut Criterion) {
    // Every section set
    let toml_content = r#"
[backend]
base_url = "http://10.0.0.5:5000"
timeout_seconds = 10

[alerts]
enabled = true
patient_info = "Ward 4, bed 12"

[dispatch]
ordering = "last_response"

[logging]
level = "debug"
format = "json"
enable_content_logging = true

[logging.component_levels]
client = "trace"
dispatch = "debug"
"#;

    c.bench_function("config_parse_complex_toml", |b| {
        b.iter(|| {
            let config: StrokewatchConfig = toml::from_str(black_box(toml_content)).unwrap();
            black_box(config)
        });
    });
}

fn bench_config_validate(c: &mut Criterion) {
    let config = StrokewatchConfig::default();

    c.bench_function("config_validate", |b| {
        b.iter(|| black_box(&config).validate())
    });
}

criterion_group!(
    benches,
    bench_config_load_from_file,
    bench_config_load_defaults,
    bench_config_toml_parsing,
    bench_config_validate
);
criterion_main!(benches);
