use crate::data::Dataset;
use crate::models::Player;
use crate::services::search_players;

/// Player list with a live name search.
#[derive(Debug)]
pub struct PlayersScreen<'a> {
    dataset: &'a Dataset,
    query: String,
}

impl<'a> PlayersScreen<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> Vec<&'a Player> {
        search_players(&self.dataset.players, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filters_and_resets() {
        let dataset = Dataset::bundled().unwrap();
        let mut screen = PlayersScreen::new(&dataset);
        assert_eq!(screen.visible().len(), dataset.players.len());

        screen.set_query("sharma");
        let names: Vec<&str> = screen.visible().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Abhishek Sharma", "Rohit Sharma"]);

        screen.set_query("");
        assert_eq!(screen.visible().len(), dataset.players.len());
    }
}
