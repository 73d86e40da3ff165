//! HTML templates and the data contexts that fill them.
//!
//! Each template is a plain struct holding exactly the data its markup
//! needs. Rendering is string building; every interpolated value goes
//! through [`escape`].
//!
//! | Context | Template | Used by |
//! |---|---|---|
//! | [`IndexPage`] | full page shell + movie list | `GET /` |
//! | [`MovieList`] | `#movies` fragment | `DELETE /delete-movie/{id}` |
//! | [`MovieDetail`] | single movie fragment | `GET /movies/{id}` |
//! | [`MovieForm`] | create / edit form fragment | `GET /new-movie`, `GET /edit-movie/{id}` |

use crate::response::{IntoResponse, Response};
use crate::store::{Movie, MovieFields};

/// Something that renders to an HTML document or fragment.
pub trait Template {
    fn render(&self) -> String;
}

/// Returns a rendered template as `200 text/html`.
pub struct Html<T>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        Response::html(self.0.render())
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c    => out.push(c),
        }
    }
    out
}

// ── Full page ─────────────────────────────────────────────────────────────────

pub struct IndexPage {
    pub movies: Vec<Movie>,
}

impl Template for IndexPage {
    fn render(&self) -> String {
        let list = MovieList::render_movies(&self.movies);
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Movies</title>
  <link rel="stylesheet" href="/public/styles.css">
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
  <header>
    <h1>Movies</h1>
    <button hx-get="/new-movie" hx-target="#panel" hx-swap="innerHTML">New movie</button>
  </header>
  <main>
{list}
    <section id="panel"></section>
  </main>
</body>
</html>
"##
        )
    }
}

// ── Fragments ─────────────────────────────────────────────────────────────────

pub struct MovieList {
    pub movies: Vec<Movie>,
}

impl MovieList {
    fn render_movies(movies: &[Movie]) -> String {
        let mut html = String::from("    <ul id=\"movies\">\n");
        for movie in movies {
            let id = escape(&movie.id);
            html.push_str(&format!(
                r##"      <li>
        <a hx-get="/movies/{id}" hx-target="#panel" hx-swap="innerHTML">{title}</a>
        <button hx-get="/edit-movie/{id}" hx-target="#panel" hx-swap="innerHTML">Edit</button>
        <button hx-delete="/delete-movie/{id}" hx-target="#movies" hx-swap="outerHTML" hx-confirm="Delete {title}?">Delete</button>
      </li>
"##,
                title = escape(&movie.title),
            ));
        }
        html.push_str("    </ul>\n");
        html
    }
}

impl Template for MovieList {
    fn render(&self) -> String {
        Self::render_movies(&self.movies)
    }
}

pub struct MovieDetail {
    pub movie: Movie,
}

impl Template for MovieDetail {
    fn render(&self) -> String {
        let m = &self.movie;
        format!(
            r#"<article class="movie">
  <h2>{title}</h2>
  <dl>
    <dt>ISBN</dt><dd>{isbn}</dd>
    <dt>Director</dt><dd>{first} {last}</dd>
  </dl>
  <p>{synopsis}</p>
</article>
"#,
            title = escape(&m.title),
            isbn = escape(&m.isbn),
            first = escape(&m.director.first_name),
            last = escape(&m.director.last_name),
            synopsis = escape(&m.synopsis),
        )
    }
}

/// HTTP verb the form submits with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormMethod {
    Post,
    Put,
}

impl FormMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Put  => "put",
        }
    }
}

/// Create / edit form. `data_form` is a copy of the values to prefill;
/// editing it never touches the store.
pub struct MovieForm {
    pub method: FormMethod,
    pub hx_url: String,
    pub page_title: &'static str,
    pub data_form: MovieFields,
}

impl MovieForm {
    pub fn create() -> Self {
        Self {
            method: FormMethod::Post,
            hx_url: "/create-movie".to_owned(),
            page_title: "New Movie",
            data_form: MovieFields::default(),
        }
    }

    pub fn edit(movie: &Movie) -> Self {
        Self {
            method: FormMethod::Put,
            hx_url: format!("/update-movie/{}", movie.id),
            page_title: "Edit Movie",
            data_form: MovieFields::from(movie),
        }
    }
}

impl Template for MovieForm {
    fn render(&self) -> String {
        let f = &self.data_form;
        format!(
            r#"<form hx-{method}="{url}">
  <h2>{page_title}</h2>
  <label>ISBN <input name="isbn" value="{isbn}"></label>
  <label>Title <input name="title" value="{title}"></label>
  <label>Synopsis <textarea name="synopsis">{synopsis}</textarea></label>
  <label>Director first name <input name="directorfirstname" value="{first}"></label>
  <label>Director last name <input name="directorlastname" value="{last}"></label>
  <button type="submit">Save</button>
</form>
"#,
            method = self.method.as_str(),
            url = escape(&self.hx_url),
            page_title = escape(self.page_title),
            isbn = escape(&f.isbn),
            title = escape(&f.title),
            synopsis = escape(&f.synopsis),
            first = escape(&f.director_first_name),
            last = escape(&f.director_last_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Director;

    fn movie() -> Movie {
        Movie {
            id: "7".into(),
            isbn: "1".into(),
            title: "Tom & Jerry <3".into(),
            synopsis: "\"cat\" vs 'mouse'".into(),
            director: Director { first_name: "Joseph".into(), last_name: "Barbera".into() },
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn list_links_every_movie() {
        let html = MovieList { movies: vec![movie()] }.render();
        assert!(html.contains(r#"hx-get="/movies/7""#));
        assert!(html.contains(r#"hx-delete="/delete-movie/7""#));
        assert!(html.contains("Tom &amp; Jerry &lt;3"));
        assert!(!html.contains("<3"));
    }

    #[test]
    fn empty_list_renders() {
        let html = MovieList { movies: Vec::new() }.render();
        assert!(html.contains(r#"<ul id="movies">"#));
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn edit_form_targets_update_route() {
        let html = MovieForm::edit(&movie()).render();
        assert!(html.contains(r#"hx-put="/update-movie/7""#));
        assert!(html.contains("Edit Movie"));
        assert!(html.contains(r#"value="Joseph""#));
        assert!(html.contains("&quot;cat&quot; vs &#39;mouse&#39;"));
    }

    #[test]
    fn create_form_is_blank() {
        let form = MovieForm::create();
        assert_eq!(form.data_form, MovieFields::default());
        let html = form.render();
        assert!(html.contains(r#"hx-post="/create-movie""#));
        assert!(html.contains("New Movie"));
    }
}
