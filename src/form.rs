use crate::profile::{BankDetail, Insurance, Profile, ProfilePatch, Tax};

/// Local, editable copy of a profile.
///
/// Seeded from a remote snapshot, edited tab by tab through the section-scoped
/// update functions, and reconciled with the remote source only when
/// `refresh` is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    form_data: Profile,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FormState {
    pub fn new(remote: Option<&ProfilePatch>) -> Self {
        Self {
            form_data: Self::initialize(remote),
        }
    }

    /// Merge a remote snapshot with the defaults into a fully populated profile.
    ///
    /// Flat strings fall back to the default when absent or empty. `department`
    /// keeps an explicit null. A remote section is taken field by field, with
    /// missing sub-fields falling back to the section default.
    pub fn initialize(remote: Option<&ProfilePatch>) -> Profile {
        let defaults = Profile::default();
        let Some(remote) = remote else {
            return defaults;
        };

        Profile {
            first_name: non_empty_or(&remote.first_name, defaults.first_name),
            last_name: non_empty_or(&remote.last_name, defaults.last_name),
            gender: non_empty_or(&remote.gender, defaults.gender),
            academic_title: non_empty_or(&remote.academic_title, defaults.academic_title),
            email: non_empty_or(&remote.email, defaults.email),
            phone: non_empty_or(&remote.phone, defaults.phone),
            address: non_empty_or(&remote.address, defaults.address),
            city: non_empty_or(&remote.city, defaults.city),
            state: non_empty_or(&remote.state, defaults.state),
            zip: non_empty_or(&remote.zip, defaults.zip),
            country: non_empty_or(&remote.country, defaults.country),
            position: non_empty_or(&remote.position, defaults.position),
            department: remote.department.clone().unwrap_or(defaults.department),
            bank_detail: remote
                .bank_detail
                .as_ref()
                .map_or(defaults.bank_detail, BankDetail::from_remote),
            tax: remote.tax.as_ref().map_or(defaults.tax, Tax::from_remote),
            insurance: remote
                .insurance
                .as_ref()
                .map_or(defaults.insurance, Insurance::from_remote),
        }
    }

    pub fn form_data(&self) -> &Profile {
        &self.form_data
    }

    /// Personal tab: merge the flat attributes, sections untouched.
    pub fn update_personal(&mut self, updates: &ProfilePatch) {
        self.form_data.merge_personal(updates);
    }

    /// Bank tab: merge `bankDetail` if present.
    pub fn update_bank(&mut self, updates: &ProfilePatch) {
        if let Some(bank_detail) = &updates.bank_detail {
            self.form_data.bank_detail.merge(bank_detail);
        }
    }

    /// Tax tab: merge `tax` and `insurance`, each independently optional.
    pub fn update_tax(&mut self, updates: &ProfilePatch) {
        if let Some(tax) = &updates.tax {
            self.form_data.tax.merge(tax);
        }
        if let Some(insurance) = &updates.insurance {
            self.form_data.insurance.merge(insurance);
        }
    }

    /// Re-derive the whole form from an authoritative snapshot. Unsynced local
    /// edits are discarded.
    pub fn refresh(&mut self, remote: Option<&ProfilePatch>) {
        self.form_data = Self::initialize(remote);
    }
}

fn non_empty_or(remote: &Option<String>, default: String) -> String {
    match remote {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: serde_json::Value) -> ProfilePatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_initialize_without_remote_uses_defaults() {
        let form = FormState::new(None);
        let data = form.form_data();
        assert_eq!(data.first_name, "");
        assert_eq!(data.last_name, "");
        assert_eq!(data.email, "");
        assert_eq!(data.country, "Germany");
        assert_eq!(data.department, None);
        assert_eq!(data.bank_detail, BankDetail::default());
        assert_eq!(data.tax, Tax::default());
        assert_eq!(data.insurance, Insurance::default());
    }

    #[test]
    fn test_initialize_with_remote_values() {
        let remote = patch(json!({
            "firstName": "John",
            "lastName": "Doe",
            "country": "USA",
            "bankDetail": { "bankName": "Test Bank" },
            "tax": { "taxId": "123" },
            "insurance": { "ssn": "456" }
        }));
        let data = FormState::initialize(Some(&remote));

        assert_eq!(data.first_name, "John");
        assert_eq!(data.last_name, "Doe");
        assert_eq!(data.country, "USA");
        assert_eq!(data.bank_detail.bank_name, "Test Bank");
        assert_eq!(data.bank_detail.iban, "");
        assert_eq!(data.bank_detail.payment_method, "Cash");
        assert_eq!(data.tax.tax_id, "123");
        assert_eq!(data.tax.disability, "None");
        assert_eq!(data.insurance.ssn, "456");
    }

    #[test]
    fn test_initialize_empty_strings_fall_back_but_null_department_is_kept() {
        let remote = patch(json!({ "country": "", "department": null }));
        let data = FormState::initialize(Some(&remote));
        assert_eq!(data.country, "Germany");
        assert_eq!(data.department, None);

        let remote = patch(json!({ "department": "Finance" }));
        let data = FormState::initialize(Some(&remote));
        assert_eq!(data.department.as_deref(), Some("Finance"));
    }

    #[test]
    fn test_update_personal() {
        let mut form = FormState::new(Some(&patch(json!({ "lastName": "Doe" }))));
        let before = form.form_data().clone();

        form.update_personal(&patch(json!({ "firstName": "Jane", "email": "jane@test.com" })));

        let data = form.form_data();
        assert_eq!(data.first_name, "Jane");
        assert_eq!(data.email, "jane@test.com");
        assert_eq!(data.last_name, "Doe");
        assert_eq!(data.bank_detail, before.bank_detail);
        assert_eq!(data.tax, before.tax);
        assert_eq!(data.insurance, before.insurance);
    }

    #[test]
    fn test_update_bank_changes_only_given_fields() {
        let mut form = FormState::new(Some(&patch(json!({ "bankDetail": { "bankName": "Old Bank" } }))));

        form.update_bank(&patch(json!({ "bankDetail": { "iban": "DE123" } })));

        let bank = &form.form_data().bank_detail;
        assert_eq!(bank.iban, "DE123");
        assert_eq!(bank.bank_name, "Old Bank");
        assert_eq!(bank.payment_method, "Cash");
    }

    #[test]
    fn test_update_bank_without_section_is_noop() {
        let mut form = FormState::default();
        let before = form.clone();
        form.update_bank(&patch(json!({ "firstName": "Ignored" })));
        assert_eq!(form, before);
    }

    #[test]
    fn test_update_tax_sections_independently() {
        let mut form = FormState::default();
        form.update_tax(&patch(json!({ "tax": { "taxId": "789" }, "insurance": { "ssn": "101" } })));
        assert_eq!(form.form_data().tax.tax_id, "789");
        assert_eq!(form.form_data().insurance.ssn, "101");

        let insurance = form.form_data().insurance.clone();
        form.update_tax(&patch(json!({ "tax": { "noTaxId": true } })));
        assert!(form.form_data().tax.no_tax_id);
        assert_eq!(form.form_data().tax.tax_id, "789");
        assert_eq!(form.form_data().insurance, insurance);
    }

    #[test]
    fn test_refresh_replaces_local_edits_and_is_idempotent() {
        let mut form = FormState::default();
        form.update_personal(&patch(json!({ "firstName": "Local" })));

        let remote = patch(json!({ "firstName": "Server", "tax": { "taxId": "1" } }));
        form.refresh(Some(&remote));
        let first = form.clone();
        form.refresh(Some(&remote));

        assert_eq!(form, first);
        assert_eq!(form.form_data().first_name, "Server");
        assert_eq!(form.form_data().tax.tax_id, "1");
    }

    #[test]
    fn test_form_data_is_independent_of_remote_snapshot() {
        let mut remote = patch(json!({ "bankDetail": { "bankName": "A" } }));
        let form = FormState::new(Some(&remote));
        if let Some(bank) = remote.bank_detail.as_mut() {
            bank.bank_name = Some("B".to_string());
        }
        assert_eq!(form.form_data().bank_detail.bank_name, "A");
    }
}
