#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCustomerDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}
