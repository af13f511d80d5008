//! Tests for the user directory service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;
use rstest::rstest;

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "Juan Pérez", "juan@example.com"),
        User::new(2, "   ", "blank@example.com"),
        User::new(3, "Sin Arroba", "sin-arroba.example.com"),
        User::new(4, "María García", "maria@example.com"),
    ]
}

#[tokio::test]
async fn validated_users_drops_malformed_entries_in_order() {
    let mut repo = MockUserRepository::new();
    repo.expect_get_users()
        .times(1)
        .return_once(|| Ok(sample_users()));

    let users = make_service(repo)
        .get_validated_users()
        .await
        .expect("listing succeeds");

    let ids: Vec<i64> = users.iter().map(|user| user.id().get()).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(users[0], User::new(1, "Juan Pérez", "juan@example.com"));
}

#[rstest]
#[case(UserRepositoryError::rejected("servidor caído"), ErrorCode::InternalError, "servidor caído")]
#[case(UserRepositoryError::unspecified(), ErrorCode::InternalError, UNKNOWN_ERROR_MESSAGE)]
#[case(UserRepositoryError::missing_payload(), ErrorCode::InternalError, UNKNOWN_ERROR_MESSAGE)]
#[case(
    UserRepositoryError::connection("refused"),
    ErrorCode::Unavailable,
    "user repository connection failed: refused"
)]
#[case(
    UserRepositoryError::query("bad json"),
    ErrorCode::InternalError,
    "user repository query failed: bad json"
)]
#[case(UserRepositoryError::not_found(5_i64), ErrorCode::NotFound, USER_NOT_FOUND_MESSAGE)]
#[tokio::test]
async fn validated_users_maps_repository_failures(
    #[case] failure: UserRepositoryError,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_get_users()
        .times(1)
        .return_once(move || Err(failure));

    let error = make_service(repo)
        .get_validated_users()
        .await
        .expect_err("listing fails");
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case(0)]
#[case(-5)]
#[tokio::test]
async fn find_rejects_non_positive_id_without_repository_call(#[case] id: i64) {
    let mut repo = MockUserRepository::new();
    repo.expect_get_user_by_id().never();

    let error = make_service(repo)
        .find_user_by_id(id)
        .await
        .expect_err("lookup rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "ID debe ser mayor a 0");
}

#[tokio::test]
async fn find_delegates_with_typed_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_get_user_by_id()
        .withf(|id| id.get() == 42)
        .times(1)
        .return_once(|id| Ok(User::new(id.get(), "Usuario 42", "usuario42@example.com")));

    let user = make_service(repo)
        .find_user_by_id(42)
        .await
        .expect("lookup succeeds");
    assert_eq!(user.id().get(), 42);
}

#[rstest]
#[case(UserRepositoryError::not_found(7_i64), USER_NOT_FOUND_MESSAGE)]
#[case(UserRepositoryError::missing_payload(), USER_NOT_FOUND_MESSAGE)]
#[case(UserRepositoryError::unspecified(), USER_NOT_FOUND_MESSAGE)]
#[case(UserRepositoryError::rejected("bloqueado"), "bloqueado")]
#[tokio::test]
async fn find_maps_repository_failures(#[case] failure: UserRepositoryError, #[case] message: &str) {
    let mut repo = MockUserRepository::new();
    repo.expect_get_user_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = make_service(repo)
        .find_user_by_id(7)
        .await
        .expect_err("lookup fails");
    assert_eq!(error.message(), message);
}

#[rstest]
#[case("", "x@y.com", "El nombre es obligatorio")]
#[case("A", "", "El email es obligatorio")]
#[case("A", "no-at-sign", "Email inválido")]
#[tokio::test]
async fn create_rejects_invalid_form_without_repository_call(
    #[case] name: &str,
    #[case] email: &str,
    #[case] message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_create_user().never();

    let error = make_service(repo)
        .create_validated_user(name, email)
        .await
        .expect_err("creation rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), message);
}

#[tokio::test]
async fn create_sends_trimmed_unassigned_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_create_user()
        .withf(|user| {
            user.id() == UserId::UNASSIGNED && user.name() == "Ana" && user.email() == "ana@x.com"
        })
        .times(1)
        .return_once(|user| Ok(user.clone().with_id(UserId::new(999))));

    let created = make_service(repo)
        .create_validated_user("  Ana ", " ana@x.com")
        .await
        .expect("creation succeeds");
    assert_eq!(created.id().get(), 999);
    assert_eq!(created.name(), "Ana");
}

#[tokio::test]
async fn create_maps_missing_payload_to_fallback() {
    let mut repo = MockUserRepository::new();
    repo.expect_create_user()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::missing_payload()));

    let error = make_service(repo)
        .create_validated_user("Ana", "ana@x.com")
        .await
        .expect_err("creation fails");
    assert_eq!(error.message(), CREATE_FAILED_MESSAGE);
}

/// Repository double whose calls panic instead of returning.
struct PanickingRepository;

#[async_trait]
impl UserRepository for PanickingRepository {
    async fn get_users(&self) -> Result<Vec<User>, UserRepositoryError> {
        panic!("disk on fire")
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        panic!("lookup {id} exploded")
    }

    async fn create_user(&self, _user: &User) -> Result<User, UserRepositoryError> {
        panic!("{}", String::new())
    }
}

#[tokio::test]
async fn repository_panic_becomes_internal_failure() {
    let service = UserService::new(Arc::new(PanickingRepository));

    let error = service
        .get_validated_users()
        .await
        .expect_err("panic is contained");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "disk on fire");
}

#[tokio::test]
async fn formatted_panic_message_is_preserved() {
    let service = UserService::new(Arc::new(PanickingRepository));

    let error = service
        .find_user_by_id(3)
        .await
        .expect_err("panic is contained");
    assert_eq!(error.message(), "lookup 3 exploded");
}

#[tokio::test]
async fn blank_panic_message_uses_fallback() {
    let service = UserService::new(Arc::new(PanickingRepository));

    let error = service
        .create_validated_user("Ana", "ana@x.com")
        .await
        .expect_err("panic is contained");
    assert_eq!(error.message(), ErrorCode::InternalError.fallback_message());
}

#[rstest]
fn panic_payload_text_is_extracted() {
    let borrowed: Box<dyn Any + Send> = Box::new("boom");
    assert_eq!(panic_message(borrowed.as_ref()), "boom");

    let opaque: Box<dyn Any + Send> = Box::new(17_u8);
    assert_eq!(panic_message(opaque.as_ref()), "");
}
