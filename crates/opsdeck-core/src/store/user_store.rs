use crate::models::User;

/// Member directory: the full list, a search-filtered view over it, and the
/// users fetched individually so far.
#[derive(Debug, Default)]
pub struct UserStore {
    pub users: Vec<User>,
    pub filtered_users: Vec<User>,
    pub fetched_users: Vec<User>,
}

impl UserStore {
    /// Replace the full list; the filtered view resets to show everyone.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.filtered_users = users.clone();
        self.users = users;
    }

    pub fn add_fetched_user(&mut self, user: User) {
        self.fetched_users.push(user);
    }

    /// Recompute the filtered view with a case-insensitive name-substring
    /// match. An empty term resets to the full list.
    pub fn filter_users(&mut self, search_term: &str) {
        if search_term.is_empty() {
            self.filtered_users = self.users.clone();
            return;
        }

        let needle = search_term.to_lowercase();
        self.filtered_users = self
            .users
            .iter()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            phone: String::new(),
            email: String::new(),
            user_id: String::new(),
        }
    }

    #[test]
    fn test_set_users_resets_filtered_view() {
        let mut store = UserStore::default();
        store.set_users(vec![user("u1", "Ada"), user("u2", "Brin")]);
        assert_eq!(store.filtered_users.len(), 2);
    }

    #[test]
    fn test_filter_users_is_case_insensitive() {
        let mut store = UserStore::default();
        store.set_users(vec![user("u1", "Ada Lovelace"), user("u2", "Brin")]);

        store.filter_users("lovelace");
        assert_eq!(store.filtered_users.len(), 1);
        assert_eq!(store.filtered_users[0].id, "u1");

        store.filter_users("");
        assert_eq!(store.filtered_users.len(), 2);
    }

    #[test]
    fn test_add_fetched_user_accumulates() {
        let mut store = UserStore::default();
        store.add_fetched_user(user("u1", "Ada"));
        store.add_fetched_user(user("u2", "Brin"));
        assert_eq!(store.fetched_users.len(), 2);
    }
}
