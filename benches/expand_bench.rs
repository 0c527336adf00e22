use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ssm_env::core::config::Settings;
use ssm_env::core::constants::DEFAULT_TEMPLATE;
use ssm_env::core::env::MemoryEnv;
use ssm_env::core::expand::Expander;
use ssm_env::core::matcher::{Matcher, PrefixMatcher, TemplateMatcher};
use ssm_env::core::store::{Parameter, ParameterStore, Parameters};
use ssm_env::core::template::Template;
use ssm_env::error::{CipherError, Result};
use std::time::Duration;

/// Store that answers every name with its own name.
struct Echo;

impl ParameterStore for Echo {
    fn get_parameters(&self, names: &[String], _with_decryption: bool) -> Result<Parameters> {
        Ok(Parameters {
            resolved: names.iter().map(|n| Parameter::new(n.clone(), n.clone())).collect(),
            invalid: Vec::new(),
        })
    }
}

struct NoKms;

impl ssm_env::core::cipher::Decrypter for NoKms {
    fn decrypt(&self, _ciphertext: &[u8]) -> Result<Vec<u8>> {
        Err(CipherError::Decryption("unused".into()).into())
    }
}

/// Environment with `size` variables, every fourth one an SSM reference.
fn environment(size: usize) -> MemoryEnv {
    (0..size)
        .map(|i| {
            let value = if i % 4 == 0 {
                format!("ssm:///app/param-{}", i)
            } else {
                format!("plain-value-{}", i)
            };
            (format!("VAR_{}", i), value)
        })
        .collect()
}

/// Template evaluation against the built-in prefix matcher.
fn bench_matchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");

    let prefix = PrefixMatcher;
    let template = TemplateMatcher::parse(DEFAULT_TEMPLATE).unwrap();
    let inputs = [("REF", "ssm:///app/db/password"), ("PLAIN", "/usr/local/bin")];

    for (label, value) in inputs {
        group.bench_with_input(BenchmarkId::new("prefix", label), &value, |b, value| {
            b.iter(|| black_box(prefix.lookup_key("NAME", black_box(value)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("template", label), &value, |b, value| {
            b.iter(|| black_box(template.lookup_key("NAME", black_box(value)).unwrap()));
        });
    }

    group.finish();
}

fn bench_template_parse(c: &mut Criterion) {
    let source = r#"{{ if hasPrefix .Value "ssm://" }}{{ trimPrefix .Value "ssm://" }}{{ else if eq .Name "DB" }}/db/{{ .Value | toLower }}{{ end }}"#;
    c.bench_function("template_parse", |b| {
        b.iter(|| black_box(Template::parse(black_box(source)).unwrap()));
    });
}

/// Full pass over environments of increasing size.
fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [16, 64, 256, 1024] {
        let env = environment(size);
        let expander = Expander::new(
            Box::new(PrefixMatcher),
            Box::new(Echo),
            Box::new(NoKms),
            Settings::default(),
        );

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("vars", size), &env, |b, env| {
            b.iter(|| {
                let mut env = env.clone();
                black_box(expander.expand(&mut env).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matchers, bench_template_parse, bench_expand);
criterion_main!(benches);
