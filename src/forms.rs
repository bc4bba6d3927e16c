//! Signup and complaint forms: per-field validity, submit sequence and the
//! WhatsApp message each form produces.
//!
//! Values are captured from the page as `Option<String>`; `None` means the
//! control is absent from the markup, in which case it is never flagged invalid
//! and its message line falls back to the placeholder.

use crate::config::SiteConfig;
use crate::format::{
    VISIT_WINDOW_MESSAGE, format_visit_date, format_visit_time, is_time_allowed, sanitize_digits,
};
use crate::message::{Launcher, NOT_INFORMED, OutboundMessage, text_or_placeholder, value_or};
use crate::pppoe::derive_login;
use crate::selection::NO_ROUTER;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FieldId {
    Name,
    Cpf,
    Phone,
    Plan,
    DueDay,
    Router,
    Consent,
    Street,
    Locality,
    VisitDate,
    VisitTime,
    Issue,
    Details,
}

impl FieldId {
    pub fn required_message(self) -> &'static str {
        match self {
            FieldId::Name => "Informe o nome completo.",
            FieldId::Cpf => "Informe o CPF.",
            FieldId::Phone => "Informe o telefone para contato.",
            FieldId::Plan => "Selecione um plano.",
            FieldId::DueDay => "Selecione o vencimento.",
            FieldId::Router => "Selecione o roteador.",
            FieldId::Consent => "Confirme o consentimento para enviar.",
            FieldId::Street => "Informe a rua.",
            FieldId::Locality => "Selecione a localidade.",
            FieldId::VisitDate => "Selecione a data da visita.",
            FieldId::VisitTime => "Selecione o horário da visita.",
            FieldId::Issue => "Selecione o tipo de problema.",
            FieldId::Details => "Descreva o problema.",
        }
    }
}

/// Custom validity for one control; `message: None` clears it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FieldCheck {
    pub field: FieldId,
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Violation {
    pub field: FieldId,
    pub message: &'static str,
}

/// Required check on the raw value; whitespace counts as filled.
pub fn check_required(field: FieldId, value: Option<&str>) -> Option<FieldCheck> {
    value.map(|value| FieldCheck {
        field,
        message: value.is_empty().then(|| field.required_message()),
    })
}

pub fn check_visit_time(value: Option<&str>) -> Option<FieldCheck> {
    value.map(|value| FieldCheck {
        field: FieldId::VisitTime,
        message: if value.is_empty() {
            Some(FieldId::VisitTime.required_message())
        } else if is_time_allowed(value) {
            None
        } else {
            Some(VISIT_WINDOW_MESSAGE)
        },
    })
}

pub fn check_consent(checked: Option<bool>) -> Option<FieldCheck> {
    checked.map(|checked| FieldCheck {
        field: FieldId::Consent,
        message: (!checked).then(|| FieldId::Consent.required_message()),
    })
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RadioOption {
    pub value: String,
    pub checked: bool,
}

/// The signup router picker: radio cards when the page offers them, a plain
/// select otherwise.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RouterChoice {
    pub radios: Vec<RadioOption>,
    pub select: Option<String>,
}

impl RouterChoice {
    /// With radios present the message belongs on the first radio; otherwise on
    /// the select.
    pub fn check(&self) -> Option<FieldCheck> {
        if self.radios.is_empty() {
            return check_required(FieldId::Router, self.select.as_deref());
        }
        let any_checked = self.radios.iter().any(|radio| radio.checked);
        Some(FieldCheck {
            field: FieldId::Router,
            message: (!any_checked).then(|| FieldId::Router.required_message()),
        })
    }

    pub fn chosen(&self) -> &str {
        match self.radios.iter().find(|radio| radio.checked) {
            Some(radio) if !radio.value.is_empty() => &radio.value,
            _ => value_or(self.select.as_deref(), NO_ROUTER),
        }
    }
}

/// Shared submit sequence: sanitize, validate, compose, open.
pub trait ContactForm {
    fn sanitize(&mut self);

    /// Validity for every control present on the page, in form order.
    fn checks(&self) -> Vec<FieldCheck>;

    fn compose(&self) -> OutboundMessage;

    fn validate(&self) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .checks()
            .into_iter()
            .filter_map(|check| {
                check.message.map(|message| Violation {
                    field: check.field,
                    message,
                })
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Runs the whole submit sequence. Nothing is opened unless every check
    /// passes.
    fn submit<L: Launcher + ?Sized>(
        &mut self,
        config: &SiteConfig,
        launcher: &L,
    ) -> Result<OutboundMessage, Vec<Violation>> {
        self.sanitize();
        self.validate()?;
        let message = self.compose();
        launcher.open(&message.whatsapp_url(config));
        Ok(message)
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SignupForm {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub plan: Option<String>,
    pub due_day: Option<String>,
    pub router: RouterChoice,
    pub consent: Option<bool>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub locality: Option<String>,
    pub reference: Option<String>,
    pub visit_date: Option<String>,
    pub visit_time: Option<String>,
}

impl SignupForm {
    pub fn suggested_login(&self) -> String {
        derive_login(self.name.as_deref().unwrap_or_default())
    }
}

impl ContactForm for SignupForm {
    fn sanitize(&mut self) {
        if let Some(cpf) = self.cpf.as_mut() {
            *cpf = sanitize_digits(cpf);
        }
    }

    fn checks(&self) -> Vec<FieldCheck> {
        [
            check_required(FieldId::Name, self.name.as_deref()),
            check_required(FieldId::Cpf, self.cpf.as_deref()),
            check_required(FieldId::Plan, self.plan.as_deref()),
            check_required(FieldId::DueDay, self.due_day.as_deref()),
            self.router.check(),
            check_required(FieldId::Street, self.street.as_deref()),
            check_required(FieldId::VisitDate, self.visit_date.as_deref()),
            check_visit_time(self.visit_time.as_deref()),
            check_consent(self.consent),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn compose(&self) -> OutboundMessage {
        let mut lines = vec![
            "🧾 *Novo cadastro (site)*".to_string(),
            format!("👤 Nome: {}", text_or_placeholder(self.name.as_deref())),
        ];
        let login = self.suggested_login();
        if !login.is_empty() {
            lines.push(format!("🔐 Login PPPoE sugerido: {login}"));
        }
        lines.extend([
            format!("🪪 CPF: {}", text_or_placeholder(self.cpf.as_deref())),
            format!(
                "📶 Plano: {}",
                value_or(self.plan.as_deref(), NOT_INFORMED)
            ),
            format!(
                "📅 Vencimento: dia {}",
                value_or(self.due_day.as_deref(), NOT_INFORMED)
            ),
            format!("📡 Roteador: {}", self.router.chosen()),
            format!("📍 Rua: {}", text_or_placeholder(self.street.as_deref())),
            format!(
                "🏘️ Bairro: {}",
                text_or_placeholder(self.neighborhood.as_deref())
            ),
            format!(
                "🌆 Localidade: {}",
                value_or(self.locality.as_deref(), NOT_INFORMED)
            ),
            format!(
                "🧭 Referência: {}",
                text_or_placeholder(self.reference.as_deref())
            ),
            visit_line(self.visit_date.as_deref(), self.visit_time.as_deref()),
        ]);
        OutboundMessage::from_lines(lines)
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ComplaintForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub locality: Option<String>,
    pub reference: Option<String>,
    pub visit_date: Option<String>,
    pub visit_time: Option<String>,
    pub issue: Option<String>,
    pub details: Option<String>,
}

impl ContactForm for ComplaintForm {
    fn sanitize(&mut self) {
        if let Some(phone) = self.phone.as_mut() {
            *phone = sanitize_digits(phone);
        }
    }

    fn checks(&self) -> Vec<FieldCheck> {
        [
            check_required(FieldId::Name, self.name.as_deref()),
            check_required(FieldId::Phone, self.phone.as_deref()),
            check_required(FieldId::Street, self.street.as_deref()),
            check_required(FieldId::Locality, self.locality.as_deref()),
            check_required(FieldId::VisitDate, self.visit_date.as_deref()),
            check_visit_time(self.visit_time.as_deref()),
            check_required(FieldId::Issue, self.issue.as_deref()),
            check_required(FieldId::Details, self.details.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn compose(&self) -> OutboundMessage {
        OutboundMessage::from_lines([
            "🛠️ *Reclamação de Internet (site)*".to_string(),
            format!("👤 Nome: {}", text_or_placeholder(self.name.as_deref())),
            format!("📞 Telefone: {}", text_or_placeholder(self.phone.as_deref())),
            format!("📍 Rua: {}", text_or_placeholder(self.street.as_deref())),
            format!(
                "🏘️ Bairro: {}",
                text_or_placeholder(self.neighborhood.as_deref())
            ),
            format!(
                "🌆 Localidade: {}",
                value_or(self.locality.as_deref(), NOT_INFORMED)
            ),
            format!(
                "🧭 Referência: {}",
                text_or_placeholder(self.reference.as_deref())
            ),
            visit_line(self.visit_date.as_deref(), self.visit_time.as_deref()),
            format!(
                "⚠️ Problema: {}",
                value_or(self.issue.as_deref(), NOT_INFORMED)
            ),
            format!(
                "📝 Detalhes: {}",
                text_or_placeholder(self.details.as_deref())
            ),
        ])
    }
}

fn visit_line(date: Option<&str>, time: Option<&str>) -> String {
    format!(
        "🗓️ Visita: {} às {}",
        format_visit_date(date.unwrap_or_default()),
        format_visit_time(time.unwrap_or_default())
    )
}

/// First plan option whose value starts with the selected plan id.
pub fn matching_plan_option<'a>(options: &'a [String], plan: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.starts_with(plan))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLauncher {
        opened: RefCell<Vec<String>>,
    }

    impl Launcher for RecordingLauncher {
        fn open(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn filled_signup() -> SignupForm {
        SignupForm {
            name: some("João da Silva"),
            cpf: some("123.456.789-09"),
            plan: some("300MB - R$ 99,90"),
            due_day: some("10"),
            router: RouterChoice {
                radios: vec![
                    RadioOption {
                        value: "TP-Link AX1500".to_string(),
                        checked: false,
                    },
                    RadioOption {
                        value: "Mikrotik hAP".to_string(),
                        checked: true,
                    },
                ],
                select: None,
            },
            consent: Some(true),
            street: some(" Rua das Flores, 12 "),
            neighborhood: some(""),
            locality: some("Sede"),
            reference: None,
            visit_date: some("2024-03-05"),
            visit_time: some("09:05"),
        }
    }

    fn empty_signup() -> SignupForm {
        SignupForm {
            name: some(""),
            cpf: some(""),
            plan: some(""),
            due_day: some(""),
            router: RouterChoice {
                radios: Vec::new(),
                select: some(""),
            },
            consent: Some(false),
            street: some(""),
            neighborhood: some(""),
            locality: some(""),
            reference: some(""),
            visit_date: some(""),
            visit_time: some(""),
        }
    }

    fn empty_complaint() -> ComplaintForm {
        ComplaintForm {
            name: some(""),
            phone: some(""),
            street: some(""),
            neighborhood: some(""),
            locality: some(""),
            reference: some(""),
            visit_date: some(""),
            visit_time: some(""),
            issue: some(""),
            details: some(""),
        }
    }

    #[test]
    fn empty_signup_never_opens_whatsapp() {
        let launcher = RecordingLauncher::default();
        let violations = empty_signup()
            .submit(&SiteConfig::default(), &launcher)
            .unwrap_err();
        assert!(launcher.opened.borrow().is_empty());
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![
                FieldId::Name,
                FieldId::Cpf,
                FieldId::Plan,
                FieldId::DueDay,
                FieldId::Router,
                FieldId::Street,
                FieldId::VisitDate,
                FieldId::VisitTime,
                FieldId::Consent,
            ]
        );
    }

    #[test]
    fn empty_complaint_never_opens_whatsapp() {
        let launcher = RecordingLauncher::default();
        let violations = empty_complaint()
            .submit(&SiteConfig::default(), &launcher)
            .unwrap_err();
        assert!(launcher.opened.borrow().is_empty());
        assert_eq!(violations.len(), 8);
        assert!(violations.iter().all(|v| v.field != FieldId::Cpf));
    }

    #[test]
    fn signup_message_lines_in_order() {
        let launcher = RecordingLauncher::default();
        let message = filled_signup()
            .submit(&SiteConfig::default(), &launcher)
            .expect("valid form");
        let expected = [
            "🧾 *Novo cadastro (site)*",
            "👤 Nome: João da Silva",
            "🔐 Login PPPoE sugerido: joaos",
            "🪪 CPF: 12345678909",
            "📶 Plano: 300MB - R$ 99,90",
            "📅 Vencimento: dia 10",
            "📡 Roteador: Mikrotik hAP",
            "📍 Rua: Rua das Flores, 12",
            "🏘️ Bairro: Não informado",
            "🌆 Localidade: Sede",
            "🧭 Referência: Não informado",
            "🗓️ Visita: 05 de março de 2024 às 09:05 da manhã",
        ]
        .join("\n");
        assert_eq!(message.as_str(), expected);

        let opened = launcher.opened.borrow();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("https://wa.me/557799390980?text=%F0%9F%A7%BE"));
    }

    #[test]
    fn visit_time_outside_windows_blocks_submit() {
        let launcher = RecordingLauncher::default();
        let mut form = filled_signup();
        form.visit_time = some("12:30");
        let violations = form
            .submit(&SiteConfig::default(), &launcher)
            .unwrap_err();
        assert_eq!(
            violations,
            vec![Violation {
                field: FieldId::VisitTime,
                message: VISIT_WINDOW_MESSAGE,
            }]
        );
        assert!(launcher.opened.borrow().is_empty());
    }

    #[test]
    fn consent_is_required() {
        let mut form = filled_signup();
        form.consent = Some(false);
        let violations = form.validate().unwrap_err();
        assert_eq!(violations[0].message, "Confirme o consentimento para enviar.");
    }

    #[test]
    fn absent_controls_are_not_flagged() {
        let form = SignupForm::default();
        assert!(form.checks().iter().all(|check| check.field == FieldId::Router));
        assert!(form.validate().is_ok());
        let text = form.compose().as_str().to_string();
        assert!(text.contains("👤 Nome: Não informado"));
        assert!(text.contains("📡 Roteador: Sem roteador"));
        assert!(text.contains("🗓️ Visita: Não informado às Não informado"));
        assert!(!text.contains("PPPoE"));
    }

    #[test]
    fn router_validity_tracks_radios() {
        let mut router = RouterChoice {
            radios: vec![RadioOption {
                value: "Mikrotik hAP".to_string(),
                checked: false,
            }],
            select: some(""),
        };
        assert_eq!(
            router.check().and_then(|check| check.message),
            Some("Selecione o roteador.")
        );
        router.radios[0].checked = true;
        assert_eq!(router.check().and_then(|check| check.message), None);
        assert_eq!(router.chosen(), "Mikrotik hAP");
    }

    #[test]
    fn router_select_is_fallback() {
        let router = RouterChoice {
            radios: Vec::new(),
            select: some("TP-Link AX1500"),
        };
        assert_eq!(router.check().and_then(|check| check.message), None);
        assert_eq!(router.chosen(), "TP-Link AX1500");
        assert_eq!(RouterChoice::default().chosen(), NO_ROUTER);
    }

    #[test]
    fn whitespace_passes_required_but_composes_placeholder() {
        let mut form = filled_signup();
        form.street = some("   ");
        assert!(form.validate().is_ok());
        assert!(form.compose().as_str().contains("📍 Rua: Não informado"));
    }

    #[test]
    fn complaint_message_lines_in_order() {
        let mut form = ComplaintForm {
            name: some("Maria Lima"),
            phone: some("(77) 99939-0980"),
            street: some("Rua B"),
            neighborhood: some("Centro"),
            locality: some("Sede"),
            reference: some("Perto da praça"),
            visit_date: some("2024-03-05"),
            visit_time: some("14:00"),
            issue: some("Sem conexão"),
            details: some(" Caiu desde ontem "),
        };
        let launcher = RecordingLauncher::default();
        let message = form
            .submit(&SiteConfig::default(), &launcher)
            .expect("valid form");
        assert_eq!(form.phone.as_deref(), Some("77999390980"));
        let expected = [
            "🛠️ *Reclamação de Internet (site)*",
            "👤 Nome: Maria Lima",
            "📞 Telefone: 77999390980",
            "📍 Rua: Rua B",
            "🏘️ Bairro: Centro",
            "🌆 Localidade: Sede",
            "🧭 Referência: Perto da praça",
            "🗓️ Visita: 05 de março de 2024 às 14:00 da tarde",
            "⚠️ Problema: Sem conexão",
            "📝 Detalhes: Caiu desde ontem",
        ]
        .join("\n");
        assert_eq!(message.as_str(), expected);
        assert_eq!(launcher.opened.borrow().len(), 1);
    }

    #[test]
    fn plan_option_matches_by_prefix() {
        let options = vec![
            String::new(),
            "100MB - R$ 69,90".to_string(),
            "300MB - R$ 99,90".to_string(),
        ];
        assert_eq!(
            matching_plan_option(&options, "300MB"),
            Some("300MB - R$ 99,90")
        );
        assert_eq!(matching_plan_option(&options, "1GB"), None);
    }
}
