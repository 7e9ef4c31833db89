//! Shared test corpus: a small but realistic card pool exercising every
//! query and validation path — multiple printings per oracle, tokens,
//! double-faced cards, the named land cycles, commanders, and companions.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::corpus::{
    Card, CardFace, Colors, Corpus, Game, ImageStatus, Layout, Legality, Rarity,
};

// Printing ids referenced directly by tests.
pub(crate) const LEA_BOLT: u128 = 101;
pub(crate) const M10_BOLT: u128 = 102;
pub(crate) const CLB_BOLT: u128 = 103;
pub(crate) const BOLT_ORACLE: u128 = 1;

pub(crate) fn pid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub(crate) fn oid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn colors(letters: &str) -> Colors {
    Colors::from_letters(letters).expect("fixture colors are valid")
}

fn base(id: u128, oracle: u128, name: &str) -> Card {
    Card {
        id: pid(id),
        oracle_id: oid(oracle),
        name: name.to_string(),
        layout: Layout::Normal,
        set: None,
        set_type: None,
        collector_number: None,
        mana_cost: None,
        cmc: 0.0,
        colors: Colors::EMPTY,
        color_identity: Colors::EMPTY,
        type_line: String::new(),
        oracle_text: None,
        power: None,
        toughness: None,
        loyalty: None,
        defense: None,
        rarity: Rarity::Common,
        border_color: Some("black".to_string()),
        security_stamp: None,
        frame: Some(2015),
        released_at: NaiveDate::from_ymd_opt(2020, 6, 1),
        lang: "en".to_string(),
        games: vec![Game::Paper],
        legalities: HashMap::new(),
        keywords: vec![],
        artist: None,
        flavor_text: None,
        promo: false,
        digital: false,
        full_art: false,
        variation: false,
        image_status: ImageStatus::HighresScan,
        faces: vec![],
    }
}

fn legal_in(card: &mut Card, formats: &[&str]) {
    for format in formats {
        card.legalities
            .insert((*format).to_string(), Legality::Legal);
    }
}

const EVERYWHERE: &[&str] = &[
    "standard",
    "pioneer",
    "modern",
    "legacy",
    "vintage",
    "pauper",
    "commander",
    "paupercommander",
    "oathbreaker",
    "brawl",
    "historic",
];

fn lea(card: &mut Card, released: &str, frame: u16, rarity: Rarity) {
    card.set = Some("lea".to_string());
    card.released_at = NaiveDate::parse_from_str(released, "%Y-%m-%d").ok();
    card.frame = Some(frame);
    card.rarity = rarity;
}

fn lightning_bolts() -> Vec<Card> {
    let mut bolts = Vec::new();

    let mut shared = base(0, BOLT_ORACLE, "Lightning Bolt");
    shared.mana_cost = Some("{R}".to_string());
    shared.cmc = 1.0;
    shared.colors = colors("r");
    shared.color_identity = colors("r");
    shared.type_line = "Instant".to_string();
    shared.oracle_text = Some("Lightning Bolt deals 3 damage to any target.".to_string());
    legal_in(
        &mut shared,
        &["modern", "legacy", "vintage", "pauper", "commander", "oathbreaker"],
    );

    let mut alpha = shared.clone();
    alpha.id = pid(LEA_BOLT);
    lea(&mut alpha, "1993-08-05", 1993, Rarity::Common);
    alpha.artist = Some("Christopher Rush".to_string());
    bolts.push(alpha);

    let mut core = shared.clone();
    core.id = pid(M10_BOLT);
    core.set = Some("m10".to_string());
    core.released_at = NaiveDate::from_ymd_opt(2009, 7, 17);
    core.frame = Some(2003);
    bolts.push(core);

    let mut reprint = shared.clone();
    reprint.id = pid(CLB_BOLT);
    reprint.set = Some("clb".to_string());
    reprint.released_at = NaiveDate::from_ymd_opt(2022, 6, 10);
    reprint.rarity = Rarity::Uncommon;
    bolts.push(reprint);

    let mut japanese = shared.clone();
    japanese.id = pid(104);
    japanese.set = Some("sta".to_string());
    japanese.released_at = NaiveDate::from_ymd_opt(2021, 4, 23);
    japanese.lang = "ja".to_string();
    bolts.push(japanese);

    bolts
}

fn alpha_cards() -> Vec<Card> {
    let mut cards = Vec::new();

    let mut force = base(201, 2, "Force of Nature");
    lea(&mut force, "1993-08-05", 1993, Rarity::Rare);
    force.mana_cost = Some("{2}{G}{G}{G}{G}".to_string());
    force.cmc = 6.0;
    force.colors = colors("g");
    force.color_identity = colors("g");
    force.type_line = "Creature — Elemental".to_string();
    force.oracle_text = Some(
        "Trample\nAt the beginning of your upkeep, Force of Nature deals 8 damage to you unless you pay {G}{G}{G}{G}."
            .to_string(),
    );
    force.power = Some("8".to_string());
    force.toughness = Some("8".to_string());
    force.keywords = vec!["Trample".to_string()];
    legal_in(&mut force, &["legacy", "vintage", "commander"]);
    cards.push(force);

    let mut wurm = base(301, 3, "Craw Wurm");
    lea(&mut wurm, "1993-08-05", 1993, Rarity::Common);
    wurm.mana_cost = Some("{4}{G}{G}".to_string());
    wurm.cmc = 6.0;
    wurm.colors = colors("g");
    wurm.color_identity = colors("g");
    wurm.type_line = "Creature — Wurm".to_string();
    wurm.power = Some("6".to_string());
    wurm.toughness = Some("4".to_string());
    legal_in(&mut wurm, &["legacy", "vintage", "pauper", "commander"]);
    cards.push(wurm);

    let mut elves = base(401, 4, "Llanowar Elves");
    lea(&mut elves, "1993-08-05", 1993, Rarity::Common);
    elves.mana_cost = Some("{G}".to_string());
    elves.cmc = 1.0;
    elves.colors = colors("g");
    elves.color_identity = colors("g");
    elves.type_line = "Creature — Elf Druid".to_string();
    elves.oracle_text = Some("{T}: Add {G}.".to_string());
    elves.power = Some("1".to_string());
    elves.toughness = Some("1".to_string());
    legal_in(&mut elves, EVERYWHERE);
    cards.push(elves);

    let mut serra = base(501, 5, "Serra Angel");
    lea(&mut serra, "1993-08-05", 1993, Rarity::Uncommon);
    serra.mana_cost = Some("{3}{W}{W}".to_string());
    serra.cmc = 5.0;
    serra.colors = colors("w");
    serra.color_identity = colors("w");
    serra.type_line = "Creature — Angel".to_string();
    serra.oracle_text = Some("Flying\nVigilance".to_string());
    serra.power = Some("4".to_string());
    serra.toughness = Some("4".to_string());
    serra.keywords = vec!["Flying".to_string(), "Vigilance".to_string()];
    legal_in(&mut serra, &["modern", "legacy", "vintage", "commander"]);
    cards.push(serra);

    let mut bears = base(601, 6, "Grizzly Bears");
    lea(&mut bears, "1993-08-05", 1993, Rarity::Common);
    bears.mana_cost = Some("{1}{G}".to_string());
    bears.cmc = 2.0;
    bears.colors = colors("g");
    bears.color_identity = colors("g");
    bears.type_line = "Creature — Bear".to_string();
    bears.power = Some("2".to_string());
    bears.toughness = Some("2".to_string());
    legal_in(&mut bears, &["legacy", "vintage", "pauper", "commander"]);
    cards.push(bears);

    let mut recall = base(1101, 11, "Ancestral Recall");
    lea(&mut recall, "1993-08-05", 1993, Rarity::Rare);
    recall.mana_cost = Some("{U}".to_string());
    recall.cmc = 1.0;
    recall.colors = colors("u");
    recall.color_identity = colors("u");
    recall.type_line = "Instant".to_string();
    recall.oracle_text = Some("Target player draws three cards.".to_string());
    recall
        .legalities
        .insert("vintage".to_string(), Legality::Restricted);
    recall
        .legalities
        .insert("legacy".to_string(), Legality::Banned);
    recall
        .legalities
        .insert("commander".to_string(), Legality::Banned);
    cards.push(recall);

    cards
}

fn basic(id: u128, oracle: u128, name: &str, subtype: &str, identity: &str) -> Card {
    let mut land = base(id, oracle, name);
    lea(&mut land, "1993-08-05", 1993, Rarity::Common);
    land.type_line = format!("Basic Land — {subtype}");
    land.color_identity = colors(identity);
    legal_in(&mut land, EVERYWHERE);
    land
}

fn basics() -> Vec<Card> {
    vec![
        basic(701, 7, "Island", "Island", "u"),
        basic(801, 8, "Forest", "Forest", "g"),
        basic(901, 9, "Mountain", "Mountain", "r"),
    ]
}

fn land(id: u128, oracle: u128, name: &str, set: &str, type_line: &str, text: &str) -> Card {
    let mut card = base(id, oracle, name);
    card.set = Some(set.to_string());
    card.type_line = type_line.to_string();
    if !text.is_empty() {
        card.oracle_text = Some(text.to_string());
    }
    card.rarity = Rarity::Rare;
    legal_in(&mut card, &["modern", "legacy", "vintage", "commander"]);
    card
}

fn fetchlands() -> Vec<Card> {
    let names: [(&str, &str, &str); 10] = [
        ("Flooded Strand", "Plains", "Island"),
        ("Polluted Delta", "Island", "Swamp"),
        ("Bloodstained Mire", "Swamp", "Mountain"),
        ("Wooded Foothills", "Mountain", "Forest"),
        ("Windswept Heath", "Forest", "Plains"),
        ("Marsh Flats", "Plains", "Swamp"),
        ("Scalding Tarn", "Island", "Mountain"),
        ("Verdant Catacombs", "Swamp", "Forest"),
        ("Arid Mesa", "Mountain", "Plains"),
        ("Misty Rainforest", "Forest", "Island"),
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, (name, a, b))| {
            land(
                3001 + i as u128 * 100,
                30 + i as u128,
                name,
                "ktk",
                "Land",
                &format!(
                    "{{T}}, Pay 1 life, Sacrifice {name}: Search your library for a {a} or {b} card, put it onto the battlefield, then shuffle."
                ),
            )
        })
        .collect()
}

fn triomes() -> Vec<Card> {
    let names: [(&str, &str, &str); 10] = [
        ("Savai Triome", "Mountain Plains Swamp", "rwb"),
        ("Ketria Triome", "Forest Island Mountain", "gur"),
        ("Indatha Triome", "Plains Swamp Forest", "wbg"),
        ("Raugrin Triome", "Island Mountain Plains", "urw"),
        ("Zagoth Triome", "Swamp Forest Island", "bgu"),
        ("Spara's Headquarters", "Forest Plains Island", "gwu"),
        ("Raffine's Tower", "Plains Island Swamp", "wub"),
        ("Xander's Lounge", "Island Swamp Mountain", "ubr"),
        ("Ziatora's Proving Ground", "Swamp Mountain Forest", "brg"),
        ("Jetmir's Garden", "Mountain Forest Plains", "rgw"),
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, (name, types, identity))| {
            let mut card = land(
                4001 + i as u128 * 100,
                40 + i as u128,
                name,
                "snc",
                &format!("Land — {types}"),
                &format!("{name} enters the battlefield tapped.\nCycling {{3}}"),
            );
            // identity letters may repeat basics in any order; strip to a set
            card.color_identity =
                Colors::from_letters(identity).expect("triome identity is valid");
            card
        })
        .collect()
}

fn cycle_lands() -> Vec<Card> {
    vec![
        land(
            5001, 50, "Steam Vents", "rna", "Land — Island Mountain",
            "({T}: Add {U} or {R}.)\nAs Steam Vents enters the battlefield, you may pay 2 life. If you don't, Steam Vents enters the battlefield tapped.",
        ),
        land(
            5101, 51, "Overgrown Tomb", "rna", "Land — Swamp Forest",
            "({T}: Add {B} or {G}.)\nAs Overgrown Tomb enters the battlefield, you may pay 2 life. If you don't, Overgrown Tomb enters the battlefield tapped.",
        ),
        land(
            5201, 52, "Glacial Fortress", "m12", "Land",
            "Glacial Fortress enters the battlefield tapped unless you control a Plains or an Island.\n{T}: Add {W} or {U}.",
        ),
        land(
            5301, 53, "Seachrome Coast", "one", "Land",
            "Seachrome Coast enters the battlefield tapped unless you control two or fewer other lands.\n{T}: Add {W} or {U}.",
        ),
        land(
            5401, 54, "Deserted Beach", "mid", "Land",
            "Deserted Beach enters the battlefield tapped unless you control two or more other lands.\n{T}: Add {W} or {U}.",
        ),
        land(
            5501, 55, "Adarkar Wastes", "dmu", "Land",
            "{T}: Add {C}.\n{T}: Add {W} or {U}. Adarkar Wastes deals 1 damage to you.",
        ),
        land(
            5601, 56, "Mystic Gate", "shm", "Land",
            "{T}: Add {C}.\n{W/U}, {T}: Add {W}{W}, {W}{U}, or {U}{U}.",
        ),
        land(
            5701, 57, "Azorius Chancery", "rav", "Land",
            "Azorius Chancery enters the battlefield tapped.\nWhen Azorius Chancery enters the battlefield, return a land you control to its owner's hand.\n{T}: Add {W}{U}.",
        ),
        land(
            5801, 58, "Temple of Enlightenment", "ths", "Land",
            "Temple of Enlightenment enters the battlefield tapped.\nWhen Temple of Enlightenment enters the battlefield, scry 1.\n{T}: Add {W} or {U}.",
        ),
        land(
            5901, 59, "Tranquil Cove", "ktk", "Land",
            "Tranquil Cove enters the battlefield tapped.\nWhen Tranquil Cove enters the battlefield, you gain 1 life.\n{T}: Add {W} or {U}.",
        ),
        land(
            6001, 60, "Prairie Stream", "bfz", "Land — Plains Island",
            "Prairie Stream enters the battlefield tapped unless you control two or more basic lands.\n{T}: Add {W} or {U}.",
        ),
        land(
            6101, 61, "Horizon Canopy", "fut", "Land",
            "{T}, Pay 1 life: Add {G} or {W}.\n{1}, {T}, Sacrifice Horizon Canopy: Draw a card.",
        ),
        land(6201, 10, "Tundra", "lea", "Land — Plains Island", ""),
    ]
}

fn tokens() -> Vec<Card> {
    let mut soldier = base(2001, 20, "Soldier");
    soldier.layout = Layout::Token;
    soldier.set = Some("tclb".to_string());
    soldier.type_line = "Token Creature — Soldier".to_string();
    soldier.colors = colors("w");
    soldier.color_identity = colors("w");
    soldier.power = Some("1".to_string());
    soldier.toughness = Some("1".to_string());

    let mut incubator = base(2101, 21, "Incubator // Phyrexian");
    incubator.layout = Layout::DoubleFacedToken;
    incubator.set = Some("tmom".to_string());
    incubator.type_line = "Token Artifact // Token Artifact Creature — Phyrexian".to_string();
    incubator.faces = vec![
        CardFace {
            name: "Incubator".to_string(),
            type_line: Some("Token Artifact".to_string()),
            oracle_text: Some("{2}: Transform this artifact.".to_string()),
            ..Default::default()
        },
        CardFace {
            name: "Phyrexian".to_string(),
            type_line: Some("Token Artifact Creature — Phyrexian".to_string()),
            power: Some("0".to_string()),
            toughness: Some("0".to_string()),
            ..Default::default()
        },
    ];

    vec![soldier, incubator]
}

fn double_faced() -> Vec<Card> {
    let mut delver = base(7001, 70, "Delver of Secrets // Insectile Aberration");
    delver.layout = Layout::Transform;
    delver.set = Some("isd".to_string());
    delver.cmc = 1.0;
    delver.colors = colors("u");
    delver.color_identity = colors("u");
    delver.type_line = "Creature — Human Wizard // Creature — Human Insect".to_string();
    delver.faces = vec![
        CardFace {
            name: "Delver of Secrets".to_string(),
            mana_cost: Some("{U}".to_string()),
            type_line: Some("Creature — Human Wizard".to_string()),
            oracle_text: Some(
                "At the beginning of your upkeep, look at the top card of your library. You may reveal that card. If an instant or sorcery card is revealed this way, transform Delver of Secrets."
                    .to_string(),
            ),
            power: Some("1".to_string()),
            toughness: Some("1".to_string()),
            colors: colors("u"),
            ..Default::default()
        },
        CardFace {
            name: "Insectile Aberration".to_string(),
            type_line: Some("Creature — Human Insect".to_string()),
            oracle_text: Some("Flying".to_string()),
            power: Some("3".to_string()),
            toughness: Some("2".to_string()),
            colors: colors("u"),
            ..Default::default()
        },
    ];
    legal_in(&mut delver, &["modern", "legacy", "vintage", "commander"]);

    let mut rebirth = base(7101, 71, "Malakir Rebirth // Malakir Mire");
    rebirth.layout = Layout::ModalDfc;
    rebirth.set = Some("znr".to_string());
    rebirth.cmc = 1.0;
    rebirth.colors = colors("b");
    rebirth.color_identity = colors("b");
    rebirth.type_line = "Instant // Land".to_string();
    rebirth.faces = vec![
        CardFace {
            name: "Malakir Rebirth".to_string(),
            mana_cost: Some("{B}".to_string()),
            type_line: Some("Instant".to_string()),
            oracle_text: Some(
                "Choose target creature. You lose 2 life. Until end of turn, that creature gains \"When this creature dies, return it to the battlefield tapped under its owner's control.\""
                    .to_string(),
            ),
            colors: colors("b"),
            ..Default::default()
        },
        CardFace {
            name: "Malakir Mire".to_string(),
            type_line: Some("Land".to_string()),
            oracle_text: Some("Malakir Mire enters the battlefield tapped.\n{T}: Add {B}.".to_string()),
            ..Default::default()
        },
    ];
    legal_in(&mut rebirth, &["standard", "modern", "commander"]);

    vec![delver, rebirth]
}

fn commanders() -> Vec<Card> {
    let mut cards = Vec::new();

    let mut tatyova = base(8001, 80, "Tatyova, Benthic Druid");
    tatyova.mana_cost = Some("{3}{G}{U}".to_string());
    tatyova.cmc = 5.0;
    tatyova.colors = colors("gu");
    tatyova.color_identity = colors("gu");
    tatyova.type_line = "Legendary Creature — Merfolk Druid".to_string();
    tatyova.oracle_text = Some(
        "Whenever a land enters the battlefield under your control, you gain 1 life and draw a card."
            .to_string(),
    );
    tatyova.power = Some("3".to_string());
    tatyova.toughness = Some("3".to_string());
    tatyova.rarity = Rarity::Uncommon;
    legal_in(&mut tatyova, &["commander", "paupercommander", "legacy"]);
    cards.push(tatyova);

    let mut ghalta = base(8101, 81, "Ghalta, Primal Hunger");
    ghalta.mana_cost = Some("{10}{G}{G}".to_string());
    ghalta.cmc = 12.0;
    ghalta.colors = colors("g");
    ghalta.color_identity = colors("g");
    ghalta.type_line = "Legendary Creature — Elder Dinosaur".to_string();
    ghalta.oracle_text = Some("Ghalta, Primal Hunger costs {X} less to cast, where X is the total power of creatures you control.\nTrample".to_string());
    ghalta.power = Some("12".to_string());
    ghalta.toughness = Some("12".to_string());
    ghalta.rarity = Rarity::Rare;
    legal_in(&mut ghalta, &["commander", "paupercommander", "pioneer"]);
    cards.push(ghalta);

    let mut thrasios = base(8201, 82, "Thrasios, Triton Hero");
    thrasios.mana_cost = Some("{G}{U}".to_string());
    thrasios.cmc = 2.0;
    thrasios.colors = colors("gu");
    thrasios.color_identity = colors("gu");
    thrasios.type_line = "Legendary Creature — Merfolk Wizard".to_string();
    thrasios.oracle_text = Some(
        "{4}: Scry 1, then reveal the top card of your library.\nPartner (You can have two commanders if both have partner.)"
            .to_string(),
    );
    thrasios.power = Some("1".to_string());
    thrasios.toughness = Some("3".to_string());
    thrasios.keywords = vec!["Partner".to_string()];
    thrasios.rarity = Rarity::Mythic;
    legal_in(&mut thrasios, &["commander", "legacy"]);
    cards.push(thrasios);

    let mut tymna = base(8301, 83, "Tymna the Weaver");
    tymna.mana_cost = Some("{1}{W}{B}".to_string());
    tymna.cmc = 3.0;
    tymna.colors = colors("wb");
    tymna.color_identity = colors("wb");
    tymna.type_line = "Legendary Creature — Human Cleric".to_string();
    tymna.oracle_text = Some(
        "At the beginning of your postcombat main phase, you may pay X life.\nPartner (You can have two commanders if both have partner.)"
            .to_string(),
    );
    tymna.power = Some("2".to_string());
    tymna.toughness = Some("2".to_string());
    tymna.keywords = vec!["Partner".to_string()];
    tymna.rarity = Rarity::Mythic;
    legal_in(&mut tymna, &["commander", "legacy"]);
    cards.push(tymna);

    let mut pir = base(8401, 84, "Pir, Imaginative Rascal");
    pir.mana_cost = Some("{2}{G}".to_string());
    pir.cmc = 3.0;
    pir.colors = colors("g");
    pir.color_identity = colors("g");
    pir.type_line = "Legendary Creature — Human".to_string();
    pir.oracle_text = Some(
        "Partner with Toothy, Imaginary Friend (When this creature enters the battlefield, target player may put Toothy into their hand from their library, then shuffle.)\nIf one or more counters would be put on a permanent you control, that many plus one of each of those kinds of counters are put on that permanent instead."
            .to_string(),
    );
    pir.power = Some("1".to_string());
    pir.toughness = Some("1".to_string());
    pir.keywords = vec!["Partner with Toothy, Imaginary Friend".to_string()];
    pir.rarity = Rarity::Rare;
    legal_in(&mut pir, &["commander", "legacy"]);
    cards.push(pir);

    let mut toothy = base(8501, 85, "Toothy, Imaginary Friend");
    toothy.mana_cost = Some("{3}{U}".to_string());
    toothy.cmc = 4.0;
    toothy.colors = colors("u");
    toothy.color_identity = colors("u");
    toothy.type_line = "Legendary Creature — Illusion".to_string();
    toothy.oracle_text = Some(
        "Partner with Pir, Imaginative Rascal (When this creature enters the battlefield, target player may put Pir into their hand from their library, then shuffle.)\nToothy, Imaginary Friend enters the battlefield with a +1/+1 counter on it."
            .to_string(),
    );
    toothy.power = Some("1".to_string());
    toothy.toughness = Some("1".to_string());
    toothy.keywords = vec!["Partner with Pir, Imaginative Rascal".to_string()];
    toothy.rarity = Rarity::Rare;
    legal_in(&mut toothy, &["commander", "legacy"]);
    cards.push(toothy);

    let mut wilson = base(8601, 86, "Wilson, Refined Grizzly");
    wilson.mana_cost = Some("{1}{G}".to_string());
    wilson.cmc = 2.0;
    wilson.colors = colors("g");
    wilson.color_identity = colors("g");
    wilson.type_line = "Legendary Creature — Bear".to_string();
    wilson.oracle_text = Some(
        "Choose a Background (You can have a Background as a second commander.)\nVigilance, reach, ward {1}"
            .to_string(),
    );
    wilson.power = Some("2".to_string());
    wilson.toughness = Some("2".to_string());
    wilson.keywords = vec!["Choose a Background".to_string()];
    legal_in(&mut wilson, &["commander", "legacy"]);
    cards.push(wilson);

    let mut background = base(8701, 87, "Raised by Giants");
    background.mana_cost = Some("{2}{G}".to_string());
    background.cmc = 3.0;
    background.colors = colors("g");
    background.color_identity = colors("g");
    background.type_line = "Legendary Enchantment — Background".to_string();
    background.oracle_text = Some(
        "Commander creatures you own have base power and toughness 10/10 and are Giants in addition to their other creature types."
            .to_string(),
    );
    background.rarity = Rarity::Rare;
    legal_in(&mut background, &["commander", "legacy"]);
    cards.push(background);

    let mut doctor = base(8801, 88, "The Tenth Doctor");
    doctor.mana_cost = Some("{3}{U}{R}".to_string());
    doctor.cmc = 5.0;
    doctor.colors = colors("ur");
    doctor.color_identity = colors("ur");
    doctor.type_line = "Legendary Creature — Time Lord Doctor".to_string();
    doctor.oracle_text = Some("Allons-y! — Whenever you attack, time travel.".to_string());
    doctor.power = Some("3".to_string());
    doctor.toughness = Some("5".to_string());
    doctor.rarity = Rarity::Mythic;
    legal_in(&mut doctor, &["commander", "legacy"]);
    cards.push(doctor);

    let mut donna = base(8901, 89, "Donna Noble");
    donna.mana_cost = Some("{2}{R}".to_string());
    donna.cmc = 3.0;
    donna.colors = colors("r");
    donna.color_identity = colors("r");
    donna.type_line = "Legendary Creature — Human".to_string();
    donna.oracle_text = Some(
        "Doctor's companion (You can have two commanders if the other is the Doctor.)\nWhenever Donna Noble blocks or becomes blocked, it deals damage equal to its power to the other creature."
            .to_string(),
    );
    donna.power = Some("2".to_string());
    donna.toughness = Some("3".to_string());
    donna.keywords = vec!["Doctor's companion".to_string()];
    donna.rarity = Rarity::Uncommon;
    legal_in(&mut donna, &["commander", "legacy"]);
    cards.push(donna);

    let mut station = base(9401, 94, "Sunforge Interceptor");
    station.mana_cost = Some("{2}{R}".to_string());
    station.cmc = 3.0;
    station.colors = colors("r");
    station.color_identity = colors("r");
    station.type_line = "Legendary Artifact — Spacecraft".to_string();
    station.oracle_text = Some("Station (Tap another creature you control: Put charge counters equal to its power on this Spacecraft.)".to_string());
    station.power = Some("3".to_string());
    station.toughness = Some("4".to_string());
    station.rarity = Rarity::Rare;
    legal_in(&mut station, &["commander", "standard"]);
    cards.push(station);

    let mut relay = base(9501, 95, "Voidline Relay");
    relay.mana_cost = Some("{3}{U}".to_string());
    relay.cmc = 4.0;
    relay.colors = colors("u");
    relay.color_identity = colors("u");
    relay.type_line = "Legendary Artifact — Spacecraft".to_string();
    relay.oracle_text = Some("Station (Tap another creature you control: Put charge counters equal to its power on this Spacecraft.)".to_string());
    relay.rarity = Rarity::Rare;
    legal_in(&mut relay, &["commander", "standard"]);
    cards.push(relay);

    cards
}

fn validation_pool() -> Vec<Card> {
    let mut cards = Vec::new();

    let mut lurrus = base(9001, 90, "Lurrus of the Dream-Den");
    lurrus.mana_cost = Some("{1}{W}{B}".to_string());
    lurrus.cmc = 3.0;
    lurrus.colors = colors("wb");
    lurrus.color_identity = colors("wb");
    lurrus.type_line = "Legendary Creature — Cat Nightmare".to_string();
    lurrus.oracle_text = Some(
        "Companion — Each permanent card in your starting deck has mana value 2 or less.\nLifelink\nDuring each of your turns, you may cast one permanent spell with mana value 2 or less from your graveyard."
            .to_string(),
    );
    lurrus.power = Some("3".to_string());
    lurrus.toughness = Some("2".to_string());
    lurrus.keywords = vec!["Companion".to_string(), "Lifelink".to_string()];
    lurrus.rarity = Rarity::Rare;
    legal_in(&mut lurrus, &["modern", "legacy", "vintage", "commander"]);
    cards.push(lurrus);

    let mut rats = base(9101, 91, "Relentless Rats");
    rats.mana_cost = Some("{1}{B}{B}".to_string());
    rats.cmc = 3.0;
    rats.colors = colors("b");
    rats.color_identity = colors("b");
    rats.type_line = "Creature — Rat".to_string();
    rats.oracle_text = Some(
        "Relentless Rats gets +1/+1 for each other creature named Relentless Rats.\nA deck can have any number of cards named Relentless Rats."
            .to_string(),
    );
    rats.power = Some("2".to_string());
    rats.toughness = Some("2".to_string());
    legal_in(&mut rats, &["modern", "legacy", "commander"]);
    cards.push(rats);

    let mut dwarves = base(9201, 92, "Seven Dwarves");
    dwarves.mana_cost = Some("{1}{R}".to_string());
    dwarves.cmc = 2.0;
    dwarves.colors = colors("r");
    dwarves.color_identity = colors("r");
    dwarves.type_line = "Creature — Dwarf".to_string();
    dwarves.oracle_text = Some(
        "Seven Dwarves gets +1/+1 for each other creature you control named Seven Dwarves.\nA deck can have up to seven cards named Seven Dwarves."
            .to_string(),
    );
    dwarves.power = Some("2".to_string());
    dwarves.toughness = Some("2".to_string());
    legal_in(&mut dwarves, &["pioneer", "modern", "commander"]);
    cards.push(dwarves);

    let mut chandra = base(9301, 93, "Chandra, Torch of Defiance");
    chandra.mana_cost = Some("{2}{R}{R}".to_string());
    chandra.cmc = 4.0;
    chandra.colors = colors("r");
    chandra.color_identity = colors("r");
    chandra.type_line = "Legendary Planeswalker — Chandra".to_string();
    chandra.oracle_text = Some("+1: Exile the top card of your library. You may cast it.\n−7: You get an emblem.".to_string());
    chandra.loyalty = Some("4".to_string());
    chandra.rarity = Rarity::Mythic;
    legal_in(&mut chandra, &["pioneer", "modern", "commander", "oathbreaker"]);
    cards.push(chandra);

    let mut counterspell = base(9601, 96, "Counterspell");
    counterspell.mana_cost = Some("{U}{U}".to_string());
    counterspell.cmc = 2.0;
    counterspell.colors = colors("u");
    counterspell.color_identity = colors("u");
    counterspell.type_line = "Instant".to_string();
    counterspell.oracle_text = Some("Counter target spell.".to_string());
    legal_in(&mut counterspell, &["modern", "legacy", "pauper", "commander"]);
    cards.push(counterspell);

    cards
}

/// All fixture cards.
pub(crate) fn corpus_cards() -> Vec<Card> {
    let mut cards = Vec::new();
    cards.extend(lightning_bolts());
    cards.extend(alpha_cards());
    cards.extend(basics());
    cards.extend(fetchlands());
    cards.extend(triomes());
    cards.extend(cycle_lands());
    cards.extend(tokens());
    cards.extend(double_faced());
    cards.extend(commanders());
    cards.extend(validation_pool());
    cards
}

/// The fixture corpus.
pub(crate) fn corpus() -> Corpus {
    Corpus::from_cards(corpus_cards())
}

/// Canonical printing of the named card; panics when absent so tests fail
/// loudly on fixture drift.
pub(crate) fn by_name<'a>(corpus: &'a Corpus, name: &str) -> &'a Card {
    corpus
        .canonical_cards()
        .find(|card| card.name == name)
        .unwrap_or_else(|| panic!("fixture card not found: {name}"))
}
