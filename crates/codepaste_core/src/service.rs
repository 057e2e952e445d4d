//! Request orchestration over the user registry and paste store.

use crate::config::{Config, NamePolicy};
use crate::constants::ANONYMOUS_OWNER;
use crate::models::{PasteKind, PasteRecord, RetrievalCode, UploadRequest};
use crate::store::{CodeSource, PasteStore};
use crate::{AppError, UserRegistry};

/// Entry point for register, upload, and fetch operations.
///
/// Holds no per-call state; everything lives in the owned registry and store.
pub struct PasteService {
    users: UserRegistry,
    pastes: PasteStore,
    name_policy: NamePolicy,
}

impl PasteService {
    /// Build a service from configuration, drawing codes from the OS CSPRNG.
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            UserRegistry::new(),
            PasteStore::new(config.max_code_attempts),
            config.name_policy.clone(),
        )
    }

    /// Build a service drawing codes from `source`.
    pub fn with_source(config: &Config, source: impl CodeSource + 'static) -> Self {
        Self::from_parts(
            UserRegistry::new(),
            PasteStore::with_source(source, config.max_code_attempts),
            config.name_policy.clone(),
        )
    }

    /// Assemble a service from already-built components.
    pub fn from_parts(users: UserRegistry, pastes: PasteStore, name_policy: NamePolicy) -> Self {
        Self {
            users,
            pastes,
            name_policy,
        }
    }

    /// Registered-name set.
    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Code-to-record store.
    pub fn pastes(&self) -> &PasteStore {
        &self.pastes
    }

    /// Claim a user name.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when `name` violates the configured
    /// [`NamePolicy`], or [`AppError::NameTaken`] when it is already claimed.
    pub fn handle_register(&self, name: &str) -> Result<(), AppError> {
        self.name_policy.validate(name)?;
        self.users.register(name).map_err(log_internal)?;
        tracing::info!(user = %name, "New user registered");
        Ok(())
    }

    /// Store an upload and hand back its retrieval code.
    ///
    /// An empty or missing owner is recorded as `"Anonymous"`. The owner is
    /// not checked against the registry. An empty body is valid; a missing
    /// one is not.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for an unrecognized kind or a missing
    /// body, and propagates internal store failures.
    pub fn handle_upload(&self, request: UploadRequest) -> Result<RetrievalCode, AppError> {
        let kind: PasteKind = request.kind.parse()?;
        let body = request
            .body
            .ok_or_else(|| AppError::BadRequest("Upload body is missing".to_string()))?;
        let owner = match request.owner {
            Some(owner) if !owner.is_empty() => owner,
            _ => ANONYMOUS_OWNER.to_string(),
        };

        let size = body.len();
        let record = PasteRecord::new(owner, kind, body);
        let owner = record.owner.clone();
        let code = self.pastes.put(record).map_err(log_internal)?;
        tracing::info!(%code, %owner, %kind, size, "Paste stored");
        Ok(code)
    }

    /// Fetch the record stored under a caller-supplied code.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for a malformed code, or
    /// [`AppError::NotFound`] when nothing is stored under it.
    pub fn handle_get(&self, raw_code: &str) -> Result<PasteRecord, AppError> {
        let code = RetrievalCode::parse(raw_code)?;
        self.pastes.get(&code).map_err(log_internal)
    }
}

fn log_internal(err: AppError) -> AppError {
    if err.is_internal() {
        tracing::error!("Internal failure: {}", err);
    }
    err
}

#[cfg(test)]
mod tests {
    use super::PasteService;
    use crate::config::{Config, NamePolicy};
    use crate::models::{PasteKind, UploadRequest};
    use crate::test_support::{FailingCodeSource, ScriptedCodeSource};
    use crate::AppError;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn service() -> PasteService {
        PasteService::new(&Config::default())
    }

    fn raw_upload(owner: Option<&str>, kind: &str, body: Option<&[u8]>) -> UploadRequest {
        UploadRequest {
            owner: owner.map(str::to_string),
            kind: kind.to_string(),
            body: body.map(<[u8]>::to_vec),
        }
    }

    #[test]
    fn register_then_duplicate_is_rejected() {
        let service = service();
        service.handle_register("alice").expect("first register");
        assert_eq!(
            service.handle_register("alice"),
            Err(AppError::NameTaken("alice".to_string()))
        );
        assert_eq!(service.users().len().expect("len"), 1);
    }

    #[test]
    fn register_applies_name_policy_before_registry() {
        let service = service();
        assert!(matches!(
            service.handle_register(""),
            Err(AppError::BadRequest(_))
        ));
        assert!(service.users().is_empty().expect("is_empty"));

        let permissive = Config {
            name_policy: NamePolicy::permissive(),
            ..Config::default()
        };
        let loose = PasteService::new(&permissive);
        loose.handle_register("").expect("empty name allowed");
        assert!(loose.users().contains("").expect("contains"));
    }

    #[test]
    fn concurrent_register_same_name_single_winner() {
        const WORKERS: usize = 16;
        let service = Arc::new(service());
        let barrier = Arc::new(Barrier::new(WORKERS));
        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    service.handle_register("race").is_ok()
                })
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|handle| handle.join().expect("join"))
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn upload_without_owner_is_anonymous() {
        let service = service();
        for owner in [None, Some("")] {
            let code = service
                .handle_upload(raw_upload(owner, "text", Some(b"\"hi\"".as_slice())))
                .expect("upload");
            let record = service.handle_get(code.as_str()).expect("get");
            assert_eq!(record.owner, "Anonymous", "owner input: {:?}", owner);
        }
    }

    #[test]
    fn upload_does_not_require_registration() {
        let service = service();
        let code = service
            .handle_upload(UploadRequest::new(
                Some("ghost"),
                PasteKind::File,
                vec![1, 2, 3],
            ))
            .expect("upload");
        let record = service.handle_get(code.as_str()).expect("get");
        assert_eq!(record.owner, "ghost");
        assert_eq!(record.kind, PasteKind::File);
        assert_eq!(record.body, vec![1, 2, 3]);
        assert!(!service.users().contains("ghost").expect("contains"));
    }

    #[test]
    fn upload_validates_kind_and_body_presence() {
        let service = service();
        assert!(matches!(
            service.handle_upload(raw_upload(Some("a"), "image", Some(b"x".as_slice()))),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.handle_upload(raw_upload(Some("a"), "-t", None)),
            Err(AppError::BadRequest(_))
        ));
        let code = service
            .handle_upload(raw_upload(Some("a"), "-t", Some(b"".as_slice())))
            .expect("empty body is valid");
        assert!(service
            .handle_get(code.as_str())
            .expect("get")
            .body
            .is_empty());
        assert_eq!(service.pastes().len().expect("len"), 1);
    }

    #[test]
    fn get_distinguishes_malformed_from_unknown() {
        let service = PasteService::with_source(
            &Config::default(),
            ScriptedCodeSource::new([[9u8, 9, 9, 9, 9, 9]]),
        );
        let code = service
            .handle_upload(raw_upload(None, "text", Some(b"x".as_slice())))
            .expect("upload");
        assert_eq!(code.as_str(), "000000");

        assert!(matches!(
            service.handle_get(""),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.handle_get("abc"),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(service.handle_get("000001"), Err(AppError::NotFound));
        assert_eq!(
            service.handle_get(" 000000 ").expect("trimmed code").body,
            b"x".to_vec()
        );
    }

    #[test]
    fn randomness_failure_propagates_as_internal() {
        let service = PasteService::with_source(&Config::default(), FailingCodeSource);
        let err = service
            .handle_upload(raw_upload(None, "file", Some(b"data".as_slice())))
            .expect_err("no randomness");
        assert!(err.is_internal());
        assert!(matches!(err, AppError::RandomnessUnavailable(_)));
    }
}
