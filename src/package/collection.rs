//! Anki collection database generation
//!
//! Writes a `collection.anki2` SQLite database (schema version 11) holding
//! one deck, the shared "Basic (HTML)" notetype, and one note + card pair
//! per submitted flashcard. The deck and notetype ids are derived from
//! their names, so packages generated at different times merge into the
//! same logical deck and template on import.

use crate::error::{Error, Result};
use crate::ident;
use rusqlite::{Connection, params};
use serde_json::{Value, json};
use std::path::Path;

/// Display name of the shared notetype
pub const MODEL_NAME: &str = "Basic (HTML)";

/// Constant seed for the shared notetype id. Every generated package
/// references the same logical model, so repeated imports do not create
/// duplicate templates.
pub const MODEL_ID_SEED: &str = "Basic_HTML_model";

/// Question-side template
const QUESTION_FORMAT: &str = "{{Front}}";

/// Answer-side template
const ANSWER_FORMAT: &str = "{{FrontSide}}<hr id=\"answer\">{{Back}}";

/// Stylesheet shared by all cards
const CARD_CSS: &str =
    ".card{font-family:arial;font-size:16px;color:#222;text-align:left}hr{margin:12px 0}";

/// Anki separates note fields with the ASCII unit separator
const FIELD_SEPARATOR: char = '\u{1f}';

/// Collection schema version 11, as written by the desktop client and the
/// packaging tools that target it.
const SCHEMA: &str = r#"
CREATE TABLE col (
    id integer PRIMARY KEY,
    crt integer NOT NULL,
    mod integer NOT NULL,
    scm integer NOT NULL,
    ver integer NOT NULL,
    dty integer NOT NULL,
    usn integer NOT NULL,
    ls integer NOT NULL,
    conf text NOT NULL,
    models text NOT NULL,
    decks text NOT NULL,
    dconf text NOT NULL,
    tags text NOT NULL
);
CREATE TABLE notes (
    id integer PRIMARY KEY,
    guid text NOT NULL,
    mid integer NOT NULL,
    mod integer NOT NULL,
    usn integer NOT NULL,
    tags text NOT NULL,
    flds text NOT NULL,
    sfld integer NOT NULL,
    csum integer NOT NULL,
    flags integer NOT NULL,
    data text NOT NULL
);
CREATE TABLE cards (
    id integer PRIMARY KEY,
    nid integer NOT NULL,
    did integer NOT NULL,
    ord integer NOT NULL,
    mod integer NOT NULL,
    usn integer NOT NULL,
    type integer NOT NULL,
    queue integer NOT NULL,
    due integer NOT NULL,
    ivl integer NOT NULL,
    factor integer NOT NULL,
    reps integer NOT NULL,
    lapses integer NOT NULL,
    left integer NOT NULL,
    odue integer NOT NULL,
    odid integer NOT NULL,
    flags integer NOT NULL,
    data text NOT NULL
);
CREATE TABLE revlog (
    id integer PRIMARY KEY,
    cid integer NOT NULL,
    usn integer NOT NULL,
    ease integer NOT NULL,
    ivl integer NOT NULL,
    lastIvl integer NOT NULL,
    factor integer NOT NULL,
    time integer NOT NULL,
    type integer NOT NULL
);
CREATE TABLE graves (
    usn integer NOT NULL,
    oid integer NOT NULL,
    type integer NOT NULL
);
CREATE INDEX ix_notes_usn ON notes (usn);
CREATE INDEX ix_cards_usn ON cards (usn);
CREATE INDEX ix_revlog_usn ON revlog (usn);
CREATE INDEX ix_cards_nid ON cards (nid);
CREATE INDEX ix_cards_sched ON cards (did, queue, due);
CREATE INDEX ix_revlog_cid ON revlog (cid);
CREATE INDEX ix_notes_csum ON notes (csum);
"#;

/// One note's rendered field values, in the model's declared field order.
#[derive(Debug, Clone)]
pub struct NoteRow {
    /// Front field (also the sort field)
    pub front: String,
    /// Back field, HTML
    pub back: String,
}

/// Write a complete collection database to `path`.
///
/// The file must not already exist; the caller owns the surrounding staging
/// directory and its cleanup.
pub fn write_collection(path: &Path, deck_name: &str, notes: &[NoteRow]) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;

    let now = chrono::Utc::now();
    let crt = now.timestamp();
    let now_ms = now.timestamp_millis();
    let model_id = ident::derive_id(MODEL_ID_SEED);
    let deck_id = ident::derive_id(deck_name);

    let models = json!({ (model_id.to_string()): model_json(model_id, deck_id, crt) });
    let decks = json!({
        "1": deck_json(1, "Default", crt),
        (deck_id.to_string()): deck_json(deck_id, deck_name, crt),
    });

    conn.execute(
        "INSERT INTO col VALUES (1, ?1, ?2, ?3, 11, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
        params![
            crt,
            now_ms,
            now_ms,
            conf_json(model_id).to_string(),
            models.to_string(),
            decks.to_string(),
            dconf_json().to_string(),
        ],
    )?;

    {
        let mut insert_note = conn.prepare(
            "INSERT INTO notes VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
        )?;
        let mut insert_card = conn.prepare(
            "INSERT INTO cards VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, '')",
        )?;

        // Ids only need to be unique within the package; Anki reassigns on
        // import conflicts. Cards start after the note id block.
        let card_base = now_ms + notes.len() as i64;
        for (index, note) in notes.iter().enumerate() {
            let note_id = now_ms + index as i64;
            let flds = format!("{}{}{}", note.front, FIELD_SEPARATOR, note.back);
            insert_note.execute(params![
                note_id,
                ident::note_guid(&note.front),
                model_id,
                crt,
                flds,
                note.front,
                ident::field_checksum(&note.front),
            ])?;
            insert_card.execute(params![card_base + index as i64, note_id, deck_id, crt])?;
        }
    }

    conn.close().map_err(|(_, e)| Error::Collection(e))?;
    Ok(())
}

fn field_json(name: &str, ord: u32) -> Value {
    json!({
        "name": name,
        "ord": ord,
        "sticky": false,
        "rtl": false,
        "font": "Arial",
        "size": 20,
        "media": [],
    })
}

fn model_json(model_id: i64, deck_id: i64, timestamp: i64) -> Value {
    json!({
        "id": model_id,
        "name": MODEL_NAME,
        "type": 0,
        "mod": timestamp,
        "usn": -1,
        "sortf": 0,
        "did": deck_id,
        "flds": [field_json("Front", 0), field_json("Back", 1)],
        "tmpls": [{
            "name": "Card 1",
            "ord": 0,
            "qfmt": QUESTION_FORMAT,
            "afmt": ANSWER_FORMAT,
            "bqfmt": "",
            "bafmt": "",
            "did": null,
        }],
        "css": CARD_CSS,
        "latexPre": "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
        "latexPost": "\\end{document}",
        "req": [[0, "all", [0]]],
        "tags": [],
        "vers": [],
    })
}

fn deck_json(id: i64, name: &str, timestamp: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "collapsed": false,
        "conf": 1,
        "dyn": 0,
        "extendNew": 0,
        "extendRev": 50,
        "lrnToday": [0, 0],
        "newToday": [0, 0],
        "revToday": [0, 0],
        "timeToday": [0, 0],
        "mod": timestamp,
        "usn": -1,
    })
}

fn conf_json(model_id: i64) -> Value {
    json!({
        "activeDecks": [1],
        "addToCur": true,
        "collapseTime": 1200,
        "curDeck": 1,
        "curModel": model_id.to_string(),
        "dueCounts": true,
        "estTimes": true,
        "newBury": true,
        "newSpread": 0,
        "nextPos": 1,
        "sortBackwards": false,
        "sortType": "noteFld",
        "timeLim": 0,
    })
}

fn dconf_json() -> Value {
    json!({
        "1": {
            "id": 1,
            "name": "Default",
            "autoplay": true,
            "dyn": false,
            "maxTaken": 60,
            "replayq": true,
            "timer": 0,
            "usn": 0,
            "mod": 0,
            "lapse": {
                "delays": [10],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0,
            },
            "new": {
                "bury": true,
                "delays": [1, 10],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true,
            },
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100,
            },
        },
    })
}
