use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use isp_site::forms::{RadioOption, RouterChoice};
use isp_site::{ContactForm, SignupForm, SiteConfig, derive_login};

fn sample_signup() -> SignupForm {
    SignupForm {
        name: Some("Maria Eduarda Costa Lima".to_string()),
        cpf: Some("123.456.789-09".to_string()),
        plan: Some("300MB - R$ 99,90".to_string()),
        due_day: Some("10".to_string()),
        router: RouterChoice {
            radios: vec![RadioOption {
                value: "Mikrotik hAP".to_string(),
                checked: true,
            }],
            select: None,
        },
        consent: Some(true),
        street: Some("Rua das Flores, 12".to_string()),
        neighborhood: Some("Centro".to_string()),
        locality: Some("Sede".to_string()),
        reference: Some("Ao lado da padaria".to_string()),
        visit_date: Some("2024-03-05".to_string()),
        visit_time: Some("09:05".to_string()),
    }
}

fn bench_login_derivation(c: &mut Criterion) {
    const NAMES: &[&str] = &["Pedro", "João da Silva", "Maria Eduarda Costa Lima"];
    for &name in NAMES {
        c.bench_with_input(BenchmarkId::new("derive_login", name), &name, |b, &name| {
            b.iter(|| black_box(derive_login(name)));
        });
    }
}

fn bench_signup_message(c: &mut Criterion) {
    let config = SiteConfig::default();
    let mut form = sample_signup();
    form.sanitize();
    c.bench_function("signup::compose_and_encode", |b| {
        b.iter(|| {
            let message = form.compose();
            black_box(message.whatsapp_url(&config));
        });
    });
}

criterion_group!(benches, bench_login_derivation, bench_signup_message);
criterion_main!(benches);
