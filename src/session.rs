use crate::client::{CatalogClient, PlaylistPublisher};
use crate::config::parse_artist_list;
use crate::pool::{TrackPool, TrackPoolBuilder, WeightedSampler};
use crate::prompt::Prompter;
use crate::publish::make_playlist;
use anyhow::Result;
use log::debug;
use std::io::{BufRead, Write};

const BUILD_FAILED_MESSAGE: &str =
    "An error occurred. Please check the artist name(s) and try again later.";
const EMPTY_POOL_MESSAGE: &str =
    "None of those artists have any tracks to choose from. Please try other artists.";

/// Answers supplied up front on the command line; anything missing is prompted for
#[derive(Debug, Default, Clone)]
pub struct SessionOptions {
    pub artists: Option<Vec<String>>,
    pub include_instrumental: Option<bool>,
    pub sample_size: Option<usize>,
    /// Print the selection only, never offer to publish
    pub debug: bool,
}

/// Interactive build, sample, regenerate and publish loop
pub struct Session<'a, R, W> {
    catalog: &'a dyn CatalogClient,
    publisher: &'a dyn PlaylistPublisher,
    prompter: Prompter<R, W>,
    builder: TrackPoolBuilder,
    options: SessionOptions,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        catalog: &'a dyn CatalogClient,
        publisher: &'a dyn PlaylistPublisher,
        prompter: Prompter<R, W>,
        builder: TrackPoolBuilder,
        options: SessionOptions,
    ) -> Self {
        Self {
            catalog,
            publisher,
            prompter,
            builder,
            options,
        }
    }

    /// Run until a selection is accepted. Returns the published playlist id, if any.
    pub fn run(&mut self) -> Result<Option<String>> {
        let pool = self.build_pool_interactively()?;
        let sample_size = match self.options.sample_size {
            Some(n) if n > 0 => n,
            _ => self.prompter.ask_count(
                "How many songs would you like the playlist to contain? Enter a number: ",
            )?,
        };

        let selection = self.choose_selection(sample_size, &pool)?;

        if self.options.debug {
            self.prompter.say("Debug mode - playlist not uploaded")?;
            return Ok(None);
        }
        if !self
            .prompter
            .ask_yes_no("Create playlist and add to library?")?
        {
            return Ok(None);
        }

        let name = self.prompter.ask("Name your playlist: ")?;
        let playlist_id = make_playlist(self.publisher, &selection, &name)?;
        self.prompter
            .say(&format!("✓ Created playlist '{name}' with ID: {playlist_id}"))?;
        Ok(Some(playlist_id))
    }

    /// Ask for artists and the instrumental flag until a non-empty pool builds
    fn build_pool_interactively(&mut self) -> Result<TrackPool> {
        loop {
            let artists = match self.options.artists.take() {
                Some(artists) if !artists.is_empty() => artists,
                _ => parse_artist_list(&self.prompter.ask(
                    "Enter the names of the artists to create a playlist from. \
                     Use a comma to separate the names of different artists: \n",
                )?),
            };
            if artists.is_empty() {
                self.prompter.say("Please enter at least one artist name.")?;
                continue;
            }

            let include_instrumental = match self.options.include_instrumental {
                Some(flag) => flag,
                None => self.prompter.ask_yes_no("Include instrumental tracks?")?,
            };

            match self
                .builder
                .build(self.catalog, &artists, include_instrumental)
            {
                Ok(pool) if pool.is_empty() => self.prompter.say(EMPTY_POOL_MESSAGE)?,
                Ok(pool) => return Ok(pool),
                Err(e) => {
                    debug!("Pool build failed: {e}");
                    self.prompter.say(BUILD_FAILED_MESSAGE)?;
                }
            }
            // Retries ask again rather than reusing the command-line flag
            self.options.include_instrumental = None;
        }
    }

    /// Sample and show tracks, resampling the same pool while the user asks to
    fn choose_selection(&mut self, sample_size: usize, pool: &TrackPool) -> Result<Vec<String>> {
        loop {
            let selection = WeightedSampler::sample(pool, sample_size)?;

            self.prompter.say("\nHere's the playlist: \n")?;
            for id in &selection {
                let name = pool.name_of(id).unwrap_or(id.as_str());
                self.prompter.say(name)?;
            }

            if !self.prompter.ask_yes_no("\nRegenerate?")? {
                return Ok(selection);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool_tests::{FakeCatalog, names};
    use std::io::Cursor;

    fn catalog() -> FakeCatalog {
        FakeCatalog::new()
            .album("A", "a1", "Saved Album", 2, true)
            .album("B", "b1", "Unsaved Album", 3, false)
    }

    fn run_session(
        catalog: &FakeCatalog,
        input: &str,
        options: SessionOptions,
    ) -> (Result<Option<String>>, String) {
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut session = Session::new(
            catalog,
            catalog,
            prompter,
            TrackPoolBuilder::default(),
            options,
        );
        let result = session.run();
        let output = String::from_utf8(session.prompter.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn test_full_interactive_run_publishes() {
        let catalog = catalog();
        let (result, output) = run_session(
            &catalog,
            "A, B\nn\nthree\n3\nn\ny\nMy Mix\n",
            SessionOptions::default(),
        );

        assert_eq!(result.unwrap(), Some("pl1".to_string()));
        assert!(output.contains("Please enter a valid number: "));
        assert!(output.contains("Here's the playlist:"));

        let published = catalog.published.borrow();
        assert_eq!(published.len(), 1);
        let (owner, name, tracks) = &published[0];
        assert_eq!(owner, "listener");
        assert_eq!(name, "My Mix");
        assert_eq!(tracks.len(), 3);
    }

    #[test]
    fn test_regenerate_shows_a_new_selection() {
        let catalog = catalog();
        let (result, output) = run_session(&catalog, "A,B\nn\n2\ny\ny\nn\nn\n", SessionOptions::default());

        assert_eq!(result.unwrap(), None);
        assert_eq!(output.matches("Here's the playlist:").count(), 3);
        assert!(catalog.published.borrow().is_empty());
    }

    #[test]
    fn test_failed_build_allows_reentry() {
        let catalog = catalog();
        let (result, output) = run_session(
            &catalog,
            "A,Nobody\nn\nA\nn\n10\nn\nn\n",
            SessionOptions::default(),
        );

        assert!(result.unwrap().is_none());
        assert_eq!(output.matches(BUILD_FAILED_MESSAGE).count(), 1);
        // Only A's two tracks are listed on the retry
        assert!(output.contains("Saved Album #1"));
        assert!(!output.contains("Unsaved Album #1"));
    }

    #[test]
    fn test_empty_pool_returns_to_artist_prompt() {
        let catalog = catalog().artist("Silent");
        let options = SessionOptions {
            artists: Some(names(&["Silent"])),
            include_instrumental: Some(false),
            ..SessionOptions::default()
        };
        let (result, output) = run_session(&catalog, "A
n
2
n
n
", options);

        assert!(result.unwrap().is_none());
        assert_eq!(output.matches(EMPTY_POOL_MESSAGE).count(), 1);
        assert_eq!(output.matches("Enter the names of the artists").count(), 1);
        assert_eq!(output.matches("Here's the playlist:").count(), 1);
        assert!(output.contains("Saved Album #"));
        assert!(catalog.published.borrow().is_empty());
    }

    #[test]
    fn test_command_line_options_skip_prompts() {
        let catalog = catalog();
        let options = SessionOptions {
            artists: Some(names(&["A", "B"])),
            include_instrumental: Some(false),
            sample_size: Some(30),
            debug: true,
        };
        let (result, output) = run_session(&catalog, "n\n", options);

        assert_eq!(result.unwrap(), None);
        assert!(!output.contains("Enter the names of the artists"));
        assert!(output.contains("Debug mode - playlist not uploaded"));
        // All five tracks are shown when more are requested than exist
        for track in ["Saved Album #1", "Saved Album #2", "Unsaved Album #3"] {
            assert!(output.contains(track));
        }
        assert!(catalog.published.borrow().is_empty());
    }
}
