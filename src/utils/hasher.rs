use crate::utils::errors::ExcavatorError;

///
/// One-way password hashing with a process-wide, configurable work factor.
///
/// bcrypt salts every hash, so the same plaintext yields a different PHC string each call,
/// and verification is performed by the primitive itself (constant-time compare semantics).
///
/// Hashing is highly CPU-bound so both operations are pushed onto the blocking thread pool
/// rather than run on the main event loop.
///
#[derive(Clone, Copy, Debug)]
pub struct Hasher {
    cost: u32,
}

impl Hasher {
    pub fn new(cost: u32) -> Self {
        Hasher { cost }
    }

    pub async fn hash(&self, plain_text_password: &str) -> Result<String, ExcavatorError> {
        let cost = self.cost;
        let plain_text_password = plain_text_password.to_string();

        tokio::task::spawn_blocking(move || bcrypt::hash(plain_text_password, cost))
            .await
            .map_err(ExcavatorError::from)?
            .map_err(ExcavatorError::from)
    }

    pub async fn verify(&self, plain_text_password: &str, phc: &str) -> Result<bool, ExcavatorError> {
        let plain_text_password = plain_text_password.to_string();
        let phc = phc.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(plain_text_password, &phc))
            .await
            .map_err(ExcavatorError::from)?
            .map_err(ExcavatorError::from)
    }
}
