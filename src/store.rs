//! In-memory movie collection.
//!
//! [`Collection`] is the plain ordered list with its lookup and mutation
//! primitives. [`MovieStore`] puts it behind a single mutex and exposes the
//! whole-request operations the handlers need, each performed under one
//! lock acquisition.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// A movie's director. Owned by exactly one [`Movie`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Director {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Movie {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub synopsis: String,
    pub director: Director,
}

/// The editable fields of a movie, as submitted by a form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MovieFields {
    pub isbn: String,
    pub title: String,
    pub synopsis: String,
    pub director_first_name: String,
    pub director_last_name: String,
}

impl MovieFields {
    fn into_movie(self, id: String) -> Movie {
        Movie {
            id,
            isbn: self.isbn,
            title: self.title,
            synopsis: self.synopsis,
            director: Director {
                first_name: self.director_first_name,
                last_name: self.director_last_name,
            },
        }
    }
}

impl From<&Movie> for MovieFields {
    fn from(movie: &Movie) -> Self {
        Self {
            isbn: movie.isbn.clone(),
            title: movie.title.clone(),
            synopsis: movie.synopsis.clone(),
            director_first_name: movie.director.first_name.clone(),
            director_last_name: movie.director.last_name.clone(),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    #[error("movie {id} not found")]
    NotFound { id: String },
}

// ── Collection ────────────────────────────────────────────────────────────────

/// Ordered movies; insertion order is display order.
///
/// Identifiers come from a counter that only moves forward, starting one
/// past the largest numeric id present at construction. Ids are never
/// reused after a delete, and an empty collection hands out `"1"`.
#[derive(Debug)]
pub struct Collection {
    movies: Vec<Movie>,
    next_id: u64,
}

impl Collection {
    pub fn new(movies: Vec<Movie>) -> Self {
        let next_id = movies.iter()
            .filter_map(|m| m.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self { movies, next_id }
    }

    /// Position of the first movie whose id equals `id`.
    pub fn find_index(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }

    pub fn list_all(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.find_index(id).map(|idx| &self.movies[idx])
    }

    /// Hands out the next identifier.
    pub fn next_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    /// Appends `movie`. The caller must have assigned a unique id.
    pub fn insert(&mut self, movie: Movie) {
        debug_assert!(self.find_index(&movie.id).is_none(), "duplicate movie id {}", movie.id);
        self.movies.push(movie);
    }

    /// Removes the first movie matching `id`, keeping the others in order.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Movie> {
        self.find_index(id).map(|idx| self.movies.remove(idx))
    }

    /// Overwrites the movie at `index` in place.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; obtain it from [`find_index`](Self::find_index).
    pub fn replace_at(&mut self, index: usize, movie: Movie) {
        self.movies[index] = movie;
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

// ── MovieStore ────────────────────────────────────────────────────────────────

/// Shared handle to the collection. Cloning is cheap; all clones see the
/// same movies.
#[derive(Clone, Debug)]
pub struct MovieStore {
    inner: Arc<Mutex<Collection>>,
}

impl MovieStore {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { inner: Arc::new(Mutex::new(Collection::new(movies))) }
    }

    /// The two movies the service starts with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Movie {
                id: "1".into(),
                isbn: "438227".into(),
                title: "Blade Runner".into(),
                synopsis: "In the twenty-first century, a corporation develops androids to be used as slaves in colonies outside of the Earth...".into(),
                director: Director { first_name: "Ridley".into(), last_name: "Scott".into() },
            },
            Movie {
                id: "2".into(),
                isbn: "454555".into(),
                title: "Alien".into(),
                synopsis: "After a space merchant ship perceives an unknown transmission as a distress call...".into(),
                director: Director { first_name: "James".into(), last_name: "Cameron".into() },
            },
        ])
    }

    /// Snapshot of every movie in display order.
    pub async fn list(&self) -> Vec<Movie> {
        self.inner.lock().await.list_all().to_vec()
    }

    pub async fn get(&self, id: &str) -> Option<Movie> {
        let movie = self.inner.lock().await.get(id).cloned();
        debug!(%id, found = movie.is_some(), "movie lookup");
        movie
    }

    /// Assigns a fresh id and appends the movie.
    pub async fn create(&self, fields: MovieFields) -> Movie {
        let mut movies = self.inner.lock().await;
        let movie = fields.into_movie(movies.next_id());
        movies.insert(movie.clone());
        movie
    }

    /// Overwrites every editable field of movie `id`, keeping its id and
    /// position.
    pub async fn update(&self, id: &str, fields: MovieFields) -> Result<Movie, StoreError> {
        let mut movies = self.inner.lock().await;
        let index = movies
            .find_index(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_owned() })?;
        let movie = fields.into_movie(id.to_owned());
        movies.replace_at(index, movie.clone());
        Ok(movie)
    }

    /// Removes movie `id` if present and returns the remaining movies, both
    /// under the same lock.
    pub async fn delete(&self, id: &str) -> (Option<Movie>, Vec<Movie>) {
        let mut movies = self.inner.lock().await;
        let removed = movies.remove_by_id(id);
        (removed, movies.list_all().to_vec())
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
