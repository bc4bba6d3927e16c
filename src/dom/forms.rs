use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::config::SiteConfig;
use crate::forms::{
    ComplaintForm, ContactForm, FieldCheck, FieldId, RadioOption, RouterChoice, SignupForm,
    matching_plan_option,
};
use crate::selection::Selection;

use super::{WindowLauncher, on, query_all, set_classes};

/// A form control that can carry a custom validity message.
#[derive(Clone)]
enum Control {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
}

impl Control {
    fn by_id(document: &Document, id: &str) -> Option<Self> {
        let element = document.get_element_by_id(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(Control::Input(input.clone()));
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Some(Control::Select(select.clone()));
        }
        element
            .dyn_ref::<HtmlTextAreaElement>()
            .map(|area| Control::TextArea(area.clone()))
    }

    fn value(&self) -> String {
        match self {
            Control::Input(input) => input.value(),
            Control::Select(select) => select.value(),
            Control::TextArea(area) => area.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Control::Input(input) => input.set_value(value),
            Control::Select(select) => select.set_value(value),
            Control::TextArea(area) => area.set_value(value),
        }
    }

    fn set_custom_validity(&self, message: &str) {
        match self {
            Control::Input(input) => input.set_custom_validity(message),
            Control::Select(select) => select.set_custom_validity(message),
            Control::TextArea(area) => area.set_custom_validity(message),
        }
    }

    fn target(&self) -> &EventTarget {
        match self {
            Control::Input(input) => input,
            Control::Select(select) => select,
            Control::TextArea(area) => area,
        }
    }

    fn options(&self) -> Vec<String> {
        let Control::Select(select) = self else {
            return Vec::new();
        };
        let options = select.options();
        (0..options.length())
            .filter_map(|idx| options.item(idx))
            .filter_map(|option| option.dyn_into::<web_sys::HtmlOptionElement>().ok())
            .map(|option| option.value())
            .collect()
    }
}

fn read(control: &Option<Control>) -> Option<String> {
    control.as_ref().map(Control::value)
}

/// Binds one of the two contact forms to its pure model.
trait FormBinding: 'static {
    type Model: ContactForm;

    fn form(&self) -> &HtmlFormElement;

    fn snapshot(&self) -> Self::Model;

    /// Writes sanitized identifiers back into their inputs.
    fn write_back(&self, model: &Self::Model);

    fn validity_target(&self, field: FieldId) -> Option<Control>;

    /// Controls re-validated live, with the event that triggers them.
    fn watched(&self) -> Vec<(FieldId, Control, &'static str)>;

    fn apply(&self, check: FieldCheck) {
        if let Some(target) = self.validity_target(check.field) {
            target.set_custom_validity(check.message.unwrap_or_default());
        }
    }
}

fn refresh_field<B: FormBinding>(binding: &B, field: FieldId) {
    let mut model = binding.snapshot();
    if matches!(field, FieldId::Cpf | FieldId::Phone) {
        model.sanitize();
        binding.write_back(&model);
    }
    if let Some(check) = model.checks().into_iter().find(|check| check.field == field) {
        binding.apply(check);
    }
}

fn handle_submit<B: FormBinding>(binding: &B, config: &SiteConfig, event: &Event) {
    event.prevent_default();
    let mut model = binding.snapshot();
    model.sanitize();
    binding.write_back(&model);
    for check in model.checks() {
        binding.apply(check);
    }
    if !binding.form().check_validity() {
        binding.form().report_validity();
        return;
    }
    if let Err(violations) = model.submit(config, &WindowLauncher) {
        debug!(count = violations.len(), "Submission blocked by validation");
        binding.form().report_validity();
    }
}

fn wire<B: FormBinding>(binding: Rc<B>, config: &Rc<SiteConfig>) {
    for (field, control, event) in binding.watched() {
        let binding = Rc::clone(&binding);
        on(control.target(), event, move |_| refresh_field(&*binding, field));
    }
    let submit_binding = Rc::clone(&binding);
    let config = Rc::clone(config);
    on(binding.form(), "submit", move |event| {
        handle_submit(&*submit_binding, &config, &event);
    });
}

struct SignupBinding {
    form: HtmlFormElement,
    name: Option<Control>,
    cpf: Option<Control>,
    plan: Option<Control>,
    due_day: Option<Control>,
    router_select: Option<Control>,
    router_radios: Vec<HtmlInputElement>,
    consent: Option<HtmlInputElement>,
    street: Option<Control>,
    neighborhood: Option<Control>,
    locality: Option<Control>,
    reference: Option<Control>,
    visit_date: Option<Control>,
    visit_time: Option<Control>,
    login_display: Option<Element>,
    highlight_classes: Vec<String>,
}

impl SignupBinding {
    fn bind(document: &Document, config: &SiteConfig) -> Option<Self> {
        let form = document
            .get_element_by_id("cadastro-form")?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        let router_radios = query_all(document, "input[name=\"roteador\"]")
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect();
        let consent = document
            .get_element_by_id("cadastro-consent")
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
        Some(Self {
            form,
            name: Control::by_id(document, "cadastro-nome"),
            cpf: Control::by_id(document, "cadastro-cpf"),
            plan: Control::by_id(document, "cadastro-plano"),
            due_day: Control::by_id(document, "cadastro-vencimento"),
            router_select: Control::by_id(document, "cadastro-roteador"),
            router_radios,
            consent,
            street: Control::by_id(document, "cadastro-rua"),
            neighborhood: Control::by_id(document, "cadastro-bairro"),
            locality: Control::by_id(document, "cadastro-localidade"),
            reference: Control::by_id(document, "cadastro-referencia"),
            visit_date: Control::by_id(document, "cadastro-visita"),
            visit_time: Control::by_id(document, "cadastro-horario"),
            login_display: document.get_element_by_id("cadastro-pppoe"),
            highlight_classes: config.highlight_classes.clone(),
        })
    }

    fn router_choice(&self) -> RouterChoice {
        RouterChoice {
            radios: self
                .router_radios
                .iter()
                .map(|radio| RadioOption {
                    value: radio.value(),
                    checked: radio.checked(),
                })
                .collect(),
            select: read(&self.router_select),
        }
    }

    fn highlight_radio(&self, radio: &HtmlInputElement) {
        if let Ok(Some(label)) = radio.closest("label") {
            set_classes(&label, &self.highlight_classes, true);
        }
    }

    fn refresh_radio_highlight(&self) {
        for radio in &self.router_radios {
            if let Ok(Some(label)) = radio.closest("label") {
                set_classes(&label, &self.highlight_classes, false);
            }
        }
        for radio in self.router_radios.iter().filter(|radio| radio.checked()) {
            self.highlight_radio(radio);
        }
    }

    fn refresh_login(&self) {
        if let Some(display) = &self.login_display {
            display.set_text_content(Some(&self.snapshot().suggested_login()));
        }
    }

    /// Carries plan and router choices made earlier on the page into the form.
    fn prefill(&self, selection: &Selection) {
        if let (Some(plan), Some(select)) = (selection.plan(), &self.plan) {
            if let Some(option) = matching_plan_option(&select.options(), plan) {
                select.set_value(option);
            }
        }
        let router = selection.router();
        if let Some(select) = &self.router_select {
            if select.options().iter().any(|option| option == router) {
                select.set_value(router);
            }
        }
        if let Some(radio) = self.router_radios.iter().find(|radio| radio.value() == router) {
            radio.set_checked(true);
            self.highlight_radio(radio);
        }
    }
}

impl FormBinding for SignupBinding {
    type Model = SignupForm;

    fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    fn snapshot(&self) -> SignupForm {
        SignupForm {
            name: read(&self.name),
            cpf: read(&self.cpf),
            plan: read(&self.plan),
            due_day: read(&self.due_day),
            router: self.router_choice(),
            consent: self.consent.as_ref().map(HtmlInputElement::checked),
            street: read(&self.street),
            neighborhood: read(&self.neighborhood),
            locality: read(&self.locality),
            reference: read(&self.reference),
            visit_date: read(&self.visit_date),
            visit_time: read(&self.visit_time),
        }
    }

    fn write_back(&self, model: &SignupForm) {
        if let (Some(control), Some(cpf)) = (&self.cpf, &model.cpf) {
            control.set_value(cpf);
        }
    }

    fn validity_target(&self, field: FieldId) -> Option<Control> {
        match field {
            FieldId::Name => self.name.clone(),
            FieldId::Cpf => self.cpf.clone(),
            FieldId::Plan => self.plan.clone(),
            FieldId::DueDay => self.due_day.clone(),
            FieldId::Router => match self.router_radios.first() {
                Some(radio) => Some(Control::Input(radio.clone())),
                None => self.router_select.clone(),
            },
            FieldId::Consent => self.consent.clone().map(Control::Input),
            FieldId::Street => self.street.clone(),
            FieldId::VisitDate => self.visit_date.clone(),
            FieldId::VisitTime => self.visit_time.clone(),
            _ => None,
        }
    }

    fn watched(&self) -> Vec<(FieldId, Control, &'static str)> {
        let mut watched: Vec<_> = [
            (FieldId::Cpf, &self.cpf, "input"),
            (FieldId::Name, &self.name, "input"),
            (FieldId::Plan, &self.plan, "change"),
            (FieldId::DueDay, &self.due_day, "change"),
            (FieldId::Router, &self.router_select, "change"),
            (FieldId::Street, &self.street, "input"),
            (FieldId::VisitDate, &self.visit_date, "change"),
            (FieldId::VisitTime, &self.visit_time, "change"),
        ]
        .into_iter()
        .filter_map(|(field, control, event)| control.clone().map(|control| (field, control, event)))
        .collect();
        if let Some(consent) = &self.consent {
            watched.push((FieldId::Consent, Control::Input(consent.clone()), "change"));
        }
        watched
    }
}

pub(super) fn wire_signup(document: &Document, config: &Rc<SiteConfig>, selection: &Selection) {
    let Some(binding) = SignupBinding::bind(document, config) else {
        return;
    };
    let binding = Rc::new(binding);
    wire(Rc::clone(&binding), config);

    if let Some(name) = &binding.name {
        let login = Rc::clone(&binding);
        on(name.target(), "input", move |_| login.refresh_login());
    }
    for radio in &binding.router_radios {
        let radios = Rc::clone(&binding);
        on(radio, "change", move |_| {
            radios.refresh_radio_highlight();
            refresh_field(&*radios, FieldId::Router);
        });
    }

    refresh_field(&*binding, FieldId::Consent);
    binding.prefill(selection);
    binding.refresh_login();
}

struct ComplaintBinding {
    form: HtmlFormElement,
    name: Option<Control>,
    phone: Option<Control>,
    street: Option<Control>,
    neighborhood: Option<Control>,
    locality: Option<Control>,
    reference: Option<Control>,
    visit_date: Option<Control>,
    visit_time: Option<Control>,
    issue: Option<Control>,
    details: Option<Control>,
}

impl ComplaintBinding {
    fn bind(document: &Document) -> Option<Self> {
        let form = document
            .get_element_by_id("reclamacao-form")?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(Self {
            form,
            name: Control::by_id(document, "reclamacao-nome"),
            phone: Control::by_id(document, "reclamacao-telefone"),
            street: Control::by_id(document, "reclamacao-rua"),
            neighborhood: Control::by_id(document, "reclamacao-bairro"),
            locality: Control::by_id(document, "reclamacao-localidade"),
            reference: Control::by_id(document, "reclamacao-referencia"),
            visit_date: Control::by_id(document, "reclamacao-visita"),
            visit_time: Control::by_id(document, "reclamacao-horario"),
            issue: Control::by_id(document, "reclamacao-tipo"),
            details: Control::by_id(document, "reclamacao-detalhes"),
        })
    }
}

impl FormBinding for ComplaintBinding {
    type Model = ComplaintForm;

    fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    fn snapshot(&self) -> ComplaintForm {
        ComplaintForm {
            name: read(&self.name),
            phone: read(&self.phone),
            street: read(&self.street),
            neighborhood: read(&self.neighborhood),
            locality: read(&self.locality),
            reference: read(&self.reference),
            visit_date: read(&self.visit_date),
            visit_time: read(&self.visit_time),
            issue: read(&self.issue),
            details: read(&self.details),
        }
    }

    fn write_back(&self, model: &ComplaintForm) {
        if let (Some(control), Some(phone)) = (&self.phone, &model.phone) {
            control.set_value(phone);
        }
    }

    fn validity_target(&self, field: FieldId) -> Option<Control> {
        match field {
            FieldId::Name => self.name.clone(),
            FieldId::Phone => self.phone.clone(),
            FieldId::Street => self.street.clone(),
            FieldId::Locality => self.locality.clone(),
            FieldId::VisitDate => self.visit_date.clone(),
            FieldId::VisitTime => self.visit_time.clone(),
            FieldId::Issue => self.issue.clone(),
            FieldId::Details => self.details.clone(),
            _ => None,
        }
    }

    fn watched(&self) -> Vec<(FieldId, Control, &'static str)> {
        [
            (FieldId::Name, &self.name, "input"),
            (FieldId::Phone, &self.phone, "input"),
            (FieldId::Street, &self.street, "input"),
            (FieldId::Locality, &self.locality, "change"),
            (FieldId::VisitDate, &self.visit_date, "change"),
            (FieldId::VisitTime, &self.visit_time, "change"),
            (FieldId::Issue, &self.issue, "change"),
            (FieldId::Details, &self.details, "input"),
        ]
        .into_iter()
        .filter_map(|(field, control, event)| control.clone().map(|control| (field, control, event)))
        .collect()
    }
}

pub(super) fn wire_complaint(document: &Document, config: &Rc<SiteConfig>) {
    if let Some(binding) = ComplaintBinding::bind(document) {
        wire(Rc::new(binding), config);
    }
}
