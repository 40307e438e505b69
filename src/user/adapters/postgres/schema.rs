//! Diesel schema for user persistence.

diesel::table! {
    /// Users tasks can be assigned to.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique normalized email address.
        #[max_length = 255]
        email -> Varchar,
    }
}
