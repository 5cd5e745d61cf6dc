use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

///
/// An employee record from the Employees collection.
///
/// Only the fields the authentication core reads are modelled here - the CRM routers own
/// the rest of the document. The sub-documents are explicit types with named optional
/// fields rather than free-form maps, so a record that fails to match the schema is
/// rejected at the boundary instead of trusted implicitly.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub personal: Personal,
    pub professional: Option<Professional>,
    pub authorization: Authorization,

    // Soft-delete flag - an inactive employee must never authenticate.
    #[serde(default)]
    pub is_active: bool,

    pub created_date: Option<bson::DateTime>,
    pub updated_date: Option<bson::DateTime>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Personal {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<Phone>,
    pub gender: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Professional {
    pub email: Option<String>,
    pub phone: Option<Phone>,
    pub designation: Option<String>,
    pub city: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Phone {
    pub primary: Option<String>,
    pub alternate: Option<String>,
}

///
/// The credential sub-document. The password field always holds a bcrypt PHC string,
/// never a plaintext secret.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Authorization {
    pub username: String,
    pub password: String,
}

impl Employee {
    ///
    /// The address reset links and notifications are mailed to.
    ///
    pub fn mail_address(&self) -> Option<&str> {
        self.personal.email.as_deref()
    }
}
