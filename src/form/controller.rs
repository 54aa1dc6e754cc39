use log::debug;

use crate::form::field::{self, Field, ValidationResult};
use crate::notifications::NotificationKind;

pub const BUSY_LABEL: &str = "Sending...";
pub const INCOMPLETE_FORM: &str = "Please fill in all required fields correctly.";
pub const SUBMITTED: &str =
    "Thank you! Your message has been sent successfully. We will contact you soon.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    /// Submission is simulated and always succeeds, so nothing enters this
    /// state yet. A real backend needs a failure transition and retry policy.
    #[allow(dead_code)]
    Failed,
}

/// A UI mutation for the DOM layer to apply.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ShowFieldError { field: String, message: String },
    ClearFieldError { field: String },
    SetSubmitBusy { label: String },
    RestoreSubmit { label: String },
    ResetFields,
    Notify { message: String, kind: NotificationKind },
    ScheduleCompletion { delay_ms: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Every state passed through, ending with `state`.
    pub trace: Vec<SubmissionState>,
    pub state: SubmissionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: SubmissionState) -> Self {
        Self { trace: vec![state], state, effects: Vec::new() }
    }
}

#[derive(Debug)]
pub struct FormController {
    state: SubmissionState,
    submit_delay: u32,
    original_label: Option<String>,
    /// Every field of the form in flight, required or not.
    submitted: Vec<String>,
}

impl FormController {
    pub fn new(submit_delay: u32) -> Self {
        Self { state: SubmissionState::Idle, submit_delay, original_label: None, submitted: Vec::new() }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn validate_field(&self, field: &Field) -> (ValidationResult, Effect) {
        let result = field::check(field);
        let effect = match &result.message {
            Some(message) => Effect::ShowFieldError {
                field: field.name.clone(),
                message: message.clone(),
            },
            None => Effect::ClearFieldError { field: field.name.clone() },
        };
        (result, effect)
    }

    /// Checks every required field, even after the first failure, so all
    /// inline errors show at once.
    pub fn validate_form(&self, fields: &[Field]) -> (bool, Vec<Effect>) {
        let mut valid = true;
        let mut effects = Vec::new();
        for f in fields.iter().filter(|f| f.required) {
            let (result, effect) = self.validate_field(f);
            valid &= result.valid;
            effects.push(effect);
        }
        (valid, effects)
    }

    /// Typing into a field drops its inline error without revalidating.
    pub fn field_input(&self, field_name: &str) -> Effect {
        Effect::ClearFieldError { field: field_name.to_string() }
    }

    pub fn submit(&mut self, fields: &[Field], submit_label: &str) -> Transition {
        if self.state != SubmissionState::Idle {
            debug!("submit ignored while {:?}", self.state);
            return Transition::unchanged(self.state);
        }

        let mut trace = vec![SubmissionState::Idle, SubmissionState::Validating];
        self.state = SubmissionState::Validating;
        let (valid, mut effects) = self.validate_form(fields);

        if !valid {
            effects.push(Effect::Notify {
                message: INCOMPLETE_FORM.to_string(),
                kind: NotificationKind::Error,
            });
            self.state = SubmissionState::Idle;
            trace.push(self.state);
            return Transition { trace, state: self.state, effects };
        }

        self.original_label = Some(submit_label.to_string());
        self.submitted = fields.iter().map(|f| f.name.clone()).collect();
        effects.push(Effect::SetSubmitBusy { label: BUSY_LABEL.to_string() });
        effects.push(Effect::ScheduleCompletion { delay_ms: self.submit_delay });
        self.state = SubmissionState::Submitting;
        trace.push(self.state);
        debug!("form submitting, completion in {}ms", self.submit_delay);
        Transition { trace, state: self.state, effects }
    }

    /// Fires once the simulated send delay has elapsed.
    pub fn complete_submission(&mut self) -> Transition {
        if self.state != SubmissionState::Submitting {
            debug!("completion ignored while {:?}", self.state);
            return Transition::unchanged(self.state);
        }

        let label = self.original_label.take().unwrap_or_default();
        let mut effects = vec![Effect::Notify {
            message: SUBMITTED.to_string(),
            kind: NotificationKind::Success,
        }];
        // optional fields flagged on blur keep their error otherwise, since
        // only required ones were revalidated on submit
        effects.extend(
            self.submitted
                .drain(..)
                .map(|field| Effect::ClearFieldError { field }),
        );
        effects.push(Effect::ResetFields);
        effects.push(Effect::RestoreSubmit { label });
        self.state = SubmissionState::Idle;
        Transition {
            trace: vec![SubmissionState::Submitting, SubmissionState::Succeeded, SubmissionState::Idle],
            state: self.state,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::FieldKind;

    fn contact_form() -> Vec<Field> {
        vec![
            Field::new("name", FieldKind::Text).required().labelled("Full Name").with_value("Asha Gurung"),
            Field::new("email", FieldKind::Email).required().labelled("Email").with_value("asha@example.com"),
            Field::new("phone", FieldKind::Tel).required().labelled("Phone").with_value("+977 984-123-4567"),
            Field::new("course", FieldKind::Select).labelled("Course"),
            Field::new("message", FieldKind::Textarea).labelled("Message"),
        ]
    }

    fn notifications(effects: &[Effect]) -> Vec<(&str, NotificationKind)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify { message, kind } => Some((message.as_str(), *kind)),
                _ => None,
            })
            .collect()
    }

    fn field_errors(effects: &[Effect]) -> Vec<(&str, &str)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::ShowFieldError { field, message } => Some((field.as_str(), message.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn validate_field_emits_matching_effect() {
        let controller = FormController::new(2000);
        let blank = Field::new("name", FieldKind::Text).required().labelled("Full Name");
        let (result, effect) = controller.validate_field(&blank);
        assert!(!result.valid);
        assert_eq!(
            effect,
            Effect::ShowFieldError { field: "name".into(), message: "Full Name is required".into() }
        );

        let filled = blank.with_value("Asha");
        let (result, effect) = controller.validate_field(&filled);
        assert!(result.valid);
        assert_eq!(effect, Effect::ClearFieldError { field: "name".into() });
    }

    #[test]
    fn validate_form_reports_every_invalid_field() {
        let controller = FormController::new(2000);
        let mut fields = contact_form();
        fields[0].value.clear();
        fields[1].value = "   ".into();

        let (valid, effects) = controller.validate_form(&fields);
        assert!(!valid);
        assert_eq!(
            field_errors(&effects),
            vec![("name", "Full Name is required"), ("email", "Email is required")]
        );
        assert!(effects.contains(&Effect::ClearFieldError { field: "phone".into() }));
    }

    #[test]
    fn validate_form_skips_optional_fields() {
        let controller = FormController::new(2000);
        let mut fields = contact_form();
        fields.push(Field::new("alt_email", FieldKind::Email).with_value("not-an-email"));

        let (valid, effects) = controller.validate_form(&fields);
        assert!(valid);
        assert_eq!(effects.len(), 3);
    }

    #[test]
    fn valid_submit_goes_busy_then_resets() {
        let mut controller = FormController::new(2000);
        let fields = contact_form();

        let t = controller.submit(&fields, "Send Message");
        assert_eq!(
            t.trace,
            vec![SubmissionState::Idle, SubmissionState::Validating, SubmissionState::Submitting]
        );
        assert_eq!(controller.state(), SubmissionState::Submitting);
        assert!(t.effects.contains(&Effect::SetSubmitBusy { label: BUSY_LABEL.into() }));
        assert!(t.effects.contains(&Effect::ScheduleCompletion { delay_ms: 2000 }));
        assert!(notifications(&t.effects).is_empty());

        let t = controller.complete_submission();
        assert_eq!(
            t.trace,
            vec![SubmissionState::Submitting, SubmissionState::Succeeded, SubmissionState::Idle]
        );
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(notifications(&t.effects), vec![(SUBMITTED, NotificationKind::Success)]);
        assert!(t.effects.contains(&Effect::ResetFields));
        assert!(t.effects.contains(&Effect::RestoreSubmit { label: "Send Message".into() }));
    }

    #[test]
    fn missing_required_field_blocks_submission() {
        let mut controller = FormController::new(2000);
        let mut fields = contact_form();
        fields[2].value.clear();

        let t = controller.submit(&fields, "Send Message");
        assert_eq!(t.state, SubmissionState::Idle);
        assert!(!t.trace.contains(&SubmissionState::Submitting));
        assert_eq!(notifications(&t.effects), vec![(INCOMPLETE_FORM, NotificationKind::Error)]);
        assert_eq!(field_errors(&t.effects), vec![("phone", "Phone is required")]);
        assert!(!t.effects.iter().any(|e| matches!(e, Effect::SetSubmitBusy { .. })));
    }

    #[test]
    fn two_blank_fields_give_two_errors_and_one_toast() {
        let mut controller = FormController::new(2000);
        let mut fields = contact_form();
        fields[0].value.clear();
        fields[1].value.clear();

        let t = controller.submit(&fields, "Send");
        assert_eq!(field_errors(&t.effects).len(), 2);
        assert_eq!(notifications(&t.effects).len(), 1);
    }

    #[test]
    fn resubmitting_while_busy_is_ignored() {
        let mut controller = FormController::new(2000);
        let fields = contact_form();
        controller.submit(&fields, "Send");

        let t = controller.submit(&fields, "Sending...");
        assert!(t.effects.is_empty());
        assert_eq!(t.state, SubmissionState::Submitting);

        let t = controller.complete_submission();
        assert!(t.effects.contains(&Effect::RestoreSubmit { label: "Send".into() }));
    }

    #[test]
    fn completion_clears_errors_on_optional_fields_too() {
        let mut controller = FormController::new(2000);
        let mut fields = contact_form();
        fields.push(Field::new("alt_email", FieldKind::Email).with_value("not-an-email"));

        let (_, flagged) = controller.validate_field(&fields[5]);
        assert!(matches!(flagged, Effect::ShowFieldError { .. }));

        let t = controller.submit(&fields, "Send");
        assert_eq!(t.state, SubmissionState::Submitting);
        assert!(!t.effects.contains(&Effect::ClearFieldError { field: "alt_email".into() }));

        let t = controller.complete_submission();
        for name in ["name", "email", "phone", "course", "message", "alt_email"] {
            assert!(
                t.effects.contains(&Effect::ClearFieldError { field: name.into() }),
                "{} keeps its inline error after reset",
                name
            );
        }
        let reset_at = t.effects.iter().position(|e| *e == Effect::ResetFields).unwrap();
        let last_clear = t
            .effects
            .iter()
            .rposition(|e| matches!(e, Effect::ClearFieldError { .. }))
            .unwrap();
        assert!(last_clear < reset_at);
    }

    #[test]
    fn stray_completion_is_a_no_op() {
        let mut controller = FormController::new(2000);
        let t = controller.complete_submission();
        assert!(t.effects.is_empty());
        assert_eq!(t.state, SubmissionState::Idle);
    }

    #[test]
    fn typing_clears_error() {
        let controller = FormController::new(2000);
        assert_eq!(controller.field_input("email"), Effect::ClearFieldError { field: "email".into() });
    }

    #[test]
    fn controller_can_submit_again_after_completion() {
        let mut controller = FormController::new(10);
        let fields = contact_form();
        controller.submit(&fields, "Send");
        controller.complete_submission();

        let t = controller.submit(&fields, "Send");
        assert_eq!(t.state, SubmissionState::Submitting);
        assert!(t.effects.contains(&Effect::ScheduleCompletion { delay_ms: 10 }));
    }
}
