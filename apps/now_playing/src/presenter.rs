//! Plain-text presentation of the filters panel and the movie listing.

use std::io::{self, Write};

use client_core::{FiltersView, ListingView, MovieCard, Presenter};

#[derive(Debug, Default)]
pub struct TextPresenter {
    filters: Option<FiltersView>,
    listing: Option<ListingView>,
}

impl Presenter for TextPresenter {
    fn present_filters(&mut self, filters: &FiltersView) {
        self.filters = Some(filters.clone());
    }

    fn present_listing(&mut self, listing: &ListingView) {
        self.listing = Some(listing.clone());
    }
}

impl TextPresenter {
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(filters) = &self.filters {
            write_filters(out, filters)?;
        }
        if let Some(listing) = &self.listing {
            write_listing(out, listing)?;
        }
        out.flush()
    }
}

fn write_filters(out: &mut impl Write, filters: &FiltersView) -> io::Result<()> {
    if !filters.visible {
        return writeln!(out, "Filters hidden (type `filters` to show)");
    }

    let rating = filters
        .selected_rating()
        .map(|value| format!("{value:.1}"))
        .unwrap_or_else(|| "custom".to_string());
    let choices: Vec<String> = filters
        .rating_options
        .iter()
        .map(|option| {
            if option.selected {
                format!("[{}]", option.value)
            } else {
                option.value.to_string()
            }
        })
        .collect();

    writeln!(out, "Minimum rating: {rating}")?;
    writeln!(out, "  options: {}", choices.join(" "))?;
    writeln!(out, "Genres:")?;
    for genre in &filters.genres {
        let mark = if genre.checked { 'x' } else { ' ' };
        writeln!(out, "  [{mark}] {:>6} {}", genre.id, genre.name)?;
    }
    writeln!(out)
}

fn write_listing(out: &mut impl Write, listing: &ListingView) -> io::Result<()> {
    writeln!(
        out,
        "Now playing ({}, {} movies)",
        listing.kind,
        listing.cards.len()
    )?;
    if listing.cards.is_empty() {
        return writeln!(out, "  No movies match the selected filters.");
    }
    for card in &listing.cards {
        write_card(out, card, listing.shows_details())?;
    }
    Ok(())
}

fn write_card(out: &mut impl Write, card: &MovieCard, details: bool) -> io::Result<()> {
    writeln!(out, "  {} | {}", card.title, card.genre_label)?;
    if let Some(url) = &card.poster_url {
        writeln!(out, "    poster: {url}")?;
    }
    if details {
        if !card.overview.is_empty() {
            writeln!(out, "    {}", card.overview)?;
        }
        writeln!(out, "    TMDb Rating: {:.0}%", card.rating_percent)?;
        if let Some(date) = &card.release_date {
            writeln!(out, "    Release Date: {date}")?;
        }
        writeln!(out, "    Popularity: {}", card.popularity)?;
    }
    Ok(())
}
