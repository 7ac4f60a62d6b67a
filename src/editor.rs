use serde::Deserialize;
use serde_json::Value;

use crate::client::{ClientError, ProfileSource};
use crate::form::FormState;
use crate::profile::{FormSection, ProfilePatch};
use crate::schema::SectionKey;
use crate::validation::{ValidationOutcome, Validator};

/// Client-side profile editing session.
///
/// Edits land in the local `FormState`; `submit`/`update_me` validate, push
/// the partial payload, then refetch and refresh the form from the source.
/// A failed submission leaves local edits as they were.
pub struct ProfileEditor<S> {
    source: S,
    form: FormState,
    validator: Validator,
}

impl<S: ProfileSource> ProfileEditor<S> {
    /// Fetch the current profile and seed the form from it.
    pub async fn load(source: S) -> Result<Self, ClientError> {
        let snapshot = source.fetch().await?;
        Ok(Self {
            source,
            form: FormState::new(Some(&snapshot)),
            validator: Validator::new(),
        })
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate the raw `payload` against the partial profile schema, push it,
    /// and reconcile the form with the refreshed remote state.
    pub async fn update_me(&mut self, payload: &Value) -> Result<(), ClientError> {
        let outcome = self.validator.validate(None, payload);
        let patch = accepted(outcome, payload)?;
        self.push_and_reload(&patch).await
    }

    /// Apply raw edits to one form tab, checked against the rules of the
    /// sections that tab owns. Nothing is pushed.
    pub fn edit(&mut self, section: FormSection, updates: &Value) -> Result<(), ClientError> {
        let outcome = match section {
            FormSection::Personal => self.validator.validate(None, updates),
            FormSection::Bank => self.validator.validate_sections(updates, &[SectionKey::BankDetail]),
            FormSection::Tax => self
                .validator
                .validate_sections(updates, &[SectionKey::Tax, SectionKey::Insurance]),
        };
        let patch = accepted(outcome, updates)?;

        match section {
            FormSection::Personal => self.form.update_personal(&patch),
            FormSection::Bank => self.form.update_bank(&patch),
            FormSection::Tax => self.form.update_tax(&patch),
        }
        Ok(())
    }

    /// Submit one form tab, validating only the sections that tab owns.
    pub async fn submit(&mut self, section: FormSection) -> Result<(), ClientError> {
        let payload = ProfilePatch::section(self.form.form_data(), section);
        let value = serde_json::to_value(&payload).map_err(|e| ClientError::Malformed(e.to_string()))?;

        let outcome = match section {
            FormSection::Personal => self.validator.validate(None, &value),
            FormSection::Bank => self.validator.validate_sections(&value, &[SectionKey::BankDetail]),
            FormSection::Tax => self
                .validator
                .validate_sections(&value, &[SectionKey::Tax, SectionKey::Insurance]),
        };
        if !outcome.success {
            let issues = outcome.errors.unwrap_or_default();
            tracing::debug!(?section, count = issues.len(), "form section failed validation");
            return Err(ClientError::Invalid(issues));
        }

        self.push_and_reload(&payload).await
    }

    /// Re-seed the form from the source, discarding unsynced edits.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        let snapshot = self.source.fetch().await?;
        self.form.refresh(Some(&snapshot));
        Ok(())
    }

    async fn push_and_reload(&mut self, payload: &ProfilePatch) -> Result<(), ClientError> {
        self.source.push(payload).await?;
        self.reload().await
    }
}

/// Decode `payload` once validation has passed.
fn accepted(outcome: ValidationOutcome, payload: &Value) -> Result<ProfilePatch, ClientError> {
    if !outcome.success {
        return Err(ClientError::Invalid(outcome.errors.unwrap_or_default()));
    }
    ProfilePatch::deserialize(payload).map_err(|e| ClientError::Malformed(e.to_string()))
}
