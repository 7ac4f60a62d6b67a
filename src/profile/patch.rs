use serde::{Deserialize, Deserializer, Serialize};

use super::model::{BankDetail, Insurance, Profile, Tax};

/// Partial profile: any subset of fields, used for updates and for remote
/// snapshots that may not carry every field.
///
/// `department` is tri-state: `None` when absent, `Some(None)` for an explicit
/// null, `Some(Some(_))` for a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_detail: Option<BankDetailPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<InsurancePatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetailPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_bic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_tax_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_job: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_salary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsurancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_ssn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have_children: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_insurance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_insurance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_health_insurance_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_health_insurance_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_health_insurance_contribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_nursing_insurance_contribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_private_health_insurance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_from_pension_insurance: Option<bool>,
}

/// Only called when the key is present, so a JSON null becomes `Some(None)`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// The tabs of the profile form, each owning a slice of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSection {
    Personal,
    Bank,
    Tax,
}

impl ProfilePatch {
    /// The payload a form tab submits, cut from the current form state.
    pub fn section(profile: &Profile, section: FormSection) -> Self {
        let full = Self::from(profile.clone());
        match section {
            FormSection::Personal => Self {
                bank_detail: None,
                tax: None,
                insurance: None,
                ..full
            },
            FormSection::Bank => Self {
                bank_detail: full.bank_detail,
                ..Self::default()
            },
            FormSection::Tax => Self {
                tax: full.tax,
                insurance: full.insurance,
                ..Self::default()
            },
        }
    }
}

impl From<Profile> for ProfilePatch {
    fn from(profile: Profile) -> Self {
        Self {
            first_name: Some(profile.first_name),
            last_name: Some(profile.last_name),
            gender: Some(profile.gender),
            academic_title: Some(profile.academic_title),
            email: Some(profile.email),
            phone: Some(profile.phone),
            address: Some(profile.address),
            city: Some(profile.city),
            state: Some(profile.state),
            zip: Some(profile.zip),
            country: Some(profile.country),
            position: Some(profile.position),
            department: Some(profile.department),
            bank_detail: Some(profile.bank_detail.into()),
            tax: Some(profile.tax.into()),
            insurance: Some(profile.insurance.into()),
        }
    }
}

impl From<BankDetail> for BankDetailPatch {
    fn from(bank: BankDetail) -> Self {
        Self {
            bank_name: Some(bank.bank_name),
            bank_bic: Some(bank.bank_bic),
            iban: Some(bank.iban),
            id: Some(bank.id),
            bank_id: Some(bank.bank_id),
            payee: Some(bank.payee),
            payment_method: Some(bank.payment_method),
        }
    }
}

impl From<Tax> for TaxPatch {
    fn from(tax: Tax) -> Self {
        Self {
            tax_id: Some(tax.tax_id),
            no_tax_id: Some(tax.no_tax_id),
            extra_job: Some(tax.extra_job),
            disability: Some(tax.disability),
            information: Some(tax.information),
            employment_status: Some(tax.employment_status),
            second_salary: Some(tax.second_salary),
        }
    }
}

impl From<Insurance> for InsurancePatch {
    fn from(insurance: Insurance) -> Self {
        Self {
            ssn: Some(insurance.ssn),
            no_ssn: Some(insurance.no_ssn),
            birth_country: Some(insurance.birth_country),
            birth_name: Some(insurance.birth_name),
            have_children: Some(insurance.have_children),
            health_insurance_type: Some(insurance.health_insurance_type),
            health_insurance: Some(insurance.health_insurance),
            desired_health_insurance_company: Some(insurance.desired_health_insurance_company),
            private_health_insurance_name: Some(insurance.private_health_insurance_name),
            private_health_insurance_contribution: Some(
                insurance.private_health_insurance_contribution,
            ),
            private_nursing_insurance_contribution: Some(
                insurance.private_nursing_insurance_contribution,
            ),
            last_private_health_insurance: Some(insurance.last_private_health_insurance),
            request_from_pension_insurance: Some(insurance.request_from_pension_insurance),
        }
    }
}
