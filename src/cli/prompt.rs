//! Interactive menus on top of any `BufRead`/`Write` pair.
//!
//! Invalid input is answered with a short message and the question is asked
//! again; it never aborts the flow.

use std::io::{self, BufRead, Write};

use crate::{
    Res,
    sort::{SortDirection, SortField, SortSpec},
    types::{PlaylistSelection, PlaylistSummary},
    utils,
};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks `question` and returns the trimmed answer, or `None` at end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Lets the user pick playlists by their 1-based index until an empty
    /// answer. Picking the same playlist twice keeps a single entry.
    pub fn select_playlists(
        &mut self,
        playlists: &[PlaylistSummary],
    ) -> io::Result<PlaylistSelection> {
        let mut selection = PlaylistSelection::new();

        loop {
            let Some(answer) = self.ask("\nChoose a playlist to add (or press Enter to finish): ")?
            else {
                break;
            };
            if answer.is_empty() {
                break;
            }

            if answer.parse::<usize>().is_err() {
                writeln!(self.output, "Invalid input. Please type a number.")?;
                continue;
            }
            let Some(index) = utils::parse_menu_index(&answer, playlists.len()) else {
                writeln!(self.output, "Number out of range. Try again.")?;
                continue;
            };

            selection.insert(playlists[index].clone());
            writeln!(self.output, "Playlists to be sorted:")?;
            for p in selection.iter() {
                writeln!(self.output, "  - {}", p.name)?;
            }
        }

        Ok(selection)
    }

    /// Collects sort fields in priority order. Stops on an empty answer or
    /// once every field has been chosen.
    pub fn select_fields(&mut self) -> io::Result<Vec<SortField>> {
        writeln!(self.output, "\n--- Choose the sort criteria ---")?;
        for (i, field) in SortField::ALL.iter().enumerate() {
            writeln!(self.output, "  {} - {}", i + 1, field)?;
        }

        let mut fields: Vec<SortField> = Vec::new();
        while fields.len() < SortField::ALL.len() {
            let question = format!(
                "Choose criterion #{} (or press Enter to finish): ",
                fields.len() + 1
            );
            let Some(answer) = self.ask(&question)? else {
                break;
            };
            if answer.is_empty() {
                break;
            }

            match answer
                .parse::<usize>()
                .ok()
                .and_then(SortField::from_menu_number)
            {
                Some(field) if !fields.contains(&field) => fields.push(field),
                _ => writeln!(self.output, "Invalid or already chosen option. Try again.")?,
            }
        }

        Ok(fields)
    }

    /// Asks for the direction until the answer is `1` or `2`.
    ///
    /// # Errors
    ///
    /// `UnexpectedEof` if the input ends before a valid answer.
    pub fn select_direction(&mut self) -> io::Result<SortDirection> {
        writeln!(self.output, "\n--- Choose the sort direction ---")?;
        writeln!(self.output, "  1 - Ascending (A-Z, oldest, least popular)")?;
        writeln!(self.output, "  2 - Descending (Z-A, newest, most popular)")?;

        loop {
            match self.ask("Choose the direction (1 or 2): ")?.as_deref() {
                Some("1") => return Ok(SortDirection::Ascending),
                Some("2") => return Ok(SortDirection::Descending),
                Some(_) => writeln!(self.output, "Invalid option. Try again.")?,
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input ended before a sort direction was chosen",
                    ));
                }
            }
        }
    }

    /// Runs the field and direction menus. `None` means no field was chosen
    /// and nothing should be sorted.
    pub fn select_sort_spec(&mut self) -> Res<Option<SortSpec>> {
        let fields = self.select_fields()?;
        if fields.is_empty() {
            return Ok(None);
        }

        let direction = self.select_direction()?;
        SortSpec::new(fields, direction).map(Some)
    }
}
