/// One (user, event) registration transition.
pub struct RegistrationDto {
    pub user_id: i64,
    pub event_id: i64,
}
