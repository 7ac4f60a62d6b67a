use serde_json::{json, Value};

/// A record that satisfies every rule of the profile schema.
pub fn complete_profile() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "gender": "Male",
        "academicTitle": "Dr.",
        "email": "john@test.com",
        "phone": "+49 30 1234",
        "address": "Main Street 1",
        "city": "Berlin",
        "state": "Berlin",
        "zip": "10115",
        "country": "Germany",
        "position": "Engineer",
        "department": null,
        "bankDetail": {
            "bankName": "Test Bank", "bankBic": "TESTDEFF", "iban": "DE89370400440532013000",
            "id": "b-1", "bankId": "370400", "payee": "John Doe", "paymentMethod": "Cash"
        },
        "tax": {
            "taxId": "12345678901", "extraJob": "No", "disability": "None",
            "information": "n/a", "employmentStatus": "Employed", "secondSalary": "No"
        },
        "insurance": {
            "ssn": "65 170839 J 003", "noSsn": false, "birthCountry": "Germany",
            "birthName": "Doe", "haveChildren": "No", "healthInsuranceType": "Public",
            "healthInsurance": "TK", "desiredHealthInsuranceCompany": "TK",
            "privateHealthInsuranceName": "n/a", "privateHealthInsuranceContribution": "0",
            "privateNursingInsuranceContribution": "0", "lastPrivateHealthInsurance": "n/a",
            "requestFromPensionInsurance": false
        }
    })
}
