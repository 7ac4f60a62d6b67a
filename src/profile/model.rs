use serde::{Deserialize, Serialize};

use super::patch::{BankDetailPatch, InsurancePatch, ProfilePatch, TaxPatch};

/// Country assumed for a freshly created profile
pub const DEFAULT_COUNTRY: &str = "Germany";
/// Payment method assumed until the user picks one
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";
/// Disability status assumed until the user picks one
pub const DEFAULT_DISABILITY: &str = "None";

/// Copy every listed field that is present in `$patch` onto `$target`.
macro_rules! merge_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

/// The complete profile record: flat personal attributes plus three sections.
///
/// Once materialized every string is a concrete value (possibly empty) and only
/// `department` may be null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub academic_title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub position: String,
    pub department: Option<String>,
    pub bank_detail: BankDetail,
    pub tax: Tax,
    pub insurance: Insurance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetail {
    pub bank_name: String,
    pub bank_bic: String,
    pub iban: String,
    pub id: String,
    pub bank_id: String,
    pub payee: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    pub tax_id: String,
    pub no_tax_id: bool,
    pub extra_job: String,
    pub disability: String,
    pub information: String,
    pub employment_status: String,
    pub second_salary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub ssn: String,
    pub no_ssn: bool,
    pub birth_country: String,
    pub birth_name: String,
    pub have_children: String,
    pub health_insurance_type: String,
    pub health_insurance: String,
    pub desired_health_insurance_company: String,
    pub private_health_insurance_name: String,
    pub private_health_insurance_contribution: String,
    pub private_nursing_insurance_contribution: String,
    pub last_private_health_insurance: String,
    pub request_from_pension_insurance: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            gender: String::new(),
            academic_title: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            position: String::new(),
            department: None,
            bank_detail: BankDetail::default(),
            tax: Tax::default(),
            insurance: Insurance::default(),
        }
    }
}

impl Default for BankDetail {
    fn default() -> Self {
        Self {
            bank_name: String::new(),
            bank_bic: String::new(),
            iban: String::new(),
            id: String::new(),
            bank_id: String::new(),
            payee: String::new(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
        }
    }
}

impl Default for Tax {
    fn default() -> Self {
        Self {
            tax_id: String::new(),
            no_tax_id: false,
            extra_job: String::new(),
            disability: DEFAULT_DISABILITY.to_string(),
            information: String::new(),
            employment_status: String::new(),
            second_salary: String::new(),
        }
    }
}

impl Profile {
    /// Merge the flat personal attributes of `patch`; sections are left alone.
    pub fn merge_personal(&mut self, patch: &ProfilePatch) {
        merge_fields!(self, patch;
            first_name, last_name, gender, academic_title, email, phone,
            address, city, state, zip, country, position, department,
        );
    }

    /// Merge everything `patch` carries, section by section and field by field.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        self.merge_personal(patch);
        if let Some(bank_detail) = &patch.bank_detail {
            self.bank_detail.merge(bank_detail);
        }
        if let Some(tax) = &patch.tax {
            self.tax.merge(tax);
        }
        if let Some(insurance) = &patch.insurance {
            self.insurance.merge(insurance);
        }
    }
}

impl BankDetail {
    pub fn merge(&mut self, patch: &BankDetailPatch) {
        merge_fields!(self, patch;
            bank_name, bank_bic, iban, id, bank_id, payee, payment_method,
        );
    }

    /// Defaults overlaid with whatever the remote section supplies.
    pub fn from_remote(patch: &BankDetailPatch) -> Self {
        let mut section = Self::default();
        section.merge(patch);
        section
    }
}

impl Tax {
    pub fn merge(&mut self, patch: &TaxPatch) {
        merge_fields!(self, patch;
            tax_id, no_tax_id, extra_job, disability, information,
            employment_status, second_salary,
        );
    }

    pub fn from_remote(patch: &TaxPatch) -> Self {
        let mut section = Self::default();
        section.merge(patch);
        section
    }
}

impl Insurance {
    pub fn merge(&mut self, patch: &InsurancePatch) {
        merge_fields!(self, patch;
            ssn, no_ssn, birth_country, birth_name, have_children,
            health_insurance_type, health_insurance, desired_health_insurance_company,
            private_health_insurance_name, private_health_insurance_contribution,
            private_nursing_insurance_contribution, last_private_health_insurance,
            request_from_pension_insurance,
        );
    }

    pub fn from_remote(patch: &InsurancePatch) -> Self {
        let mut section = Self::default();
        section.merge(patch);
        section
    }
}
