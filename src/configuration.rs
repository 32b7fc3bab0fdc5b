pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> u16;
    fn admin_password(&self) -> String;
    fn database_url(&self) -> Option<String>;
}
