//! Prompt construction: chart serialization, system instructions, and the
//! structured-output schema for the daily fortune.

use chrono::{Datelike, NaiveDate};

use zendestiny_core::{BaziResult, Language};

/// The chart serialized as textual context for the model.
#[must_use]
pub fn chart_context(chart: &BaziResult, current_year: i32) -> String {
    format!(
        "Birth Place: {place}\n\
         Gender: {gender}\n\
         Birth Date: {instant}\n\
         \n\
         Four Pillars (BaZi):\n\
         - Year: {year} ({animal}) - Element: {year_el}\n\
         - Month: {month} - Element: {month_el}\n\
         - Day (Day Master): {day} - Element: {day_el}\n\
         - Hour: {hour} - Element: {hour_el}\n\
         \n\
         Current Major Cycle (Da Yun) context: the current cycle is the one \
         containing the year {current_year}.\n",
        place = chart.birth_place,
        gender = chart.gender,
        instant = chart.birth_instant(),
        year = chart.year_pillar,
        animal = chart.year_pillar.branch_animal,
        year_el = chart.year_pillar.stem_element,
        month = chart.month_pillar,
        month_el = chart.month_pillar.stem_element,
        day = chart.day_pillar,
        day_el = chart.day_pillar.stem_element,
        hour = chart.hour_pillar,
        hour_el = chart.hour_pillar.stem_element,
    )
}

fn language_directive(language: Language) -> &'static str {
    match language {
        Language::Zh => "IMPORTANT: You MUST answer in simplified Chinese (简体中文).",
        Language::En => "IMPORTANT: You MUST answer in English.",
    }
}

/// System instruction seeding a consultation chat.
#[must_use]
pub fn system_instruction(chart: &BaziResult, language: Language, current_year: i32) -> String {
    format!(
        "You are a wise, empathetic, and expert Master of Chinese Metaphysics \
         (BaZi and Feng Shui). You interpret the user's \"Four Pillars of \
         Destiny\" provided in the context.\n\
         \n\
         {directive}\n\
         \n\
         Guidelines:\n\
         1. Analyze the interaction between the Day Master (the Day Stem) and \
         the other elements (Season, Strength).\n\
         2. Be encouraging but honest. Use metaphors related to nature \
         (e.g., \"Weak Fire needs Wood to burn\").\n\
         3. Structure your answers clearly.\n\
         4. If asked about \"Love\", look for the Spouse Star (Wealth element \
         for men, Officer element for women).\n\
         5. If asked about \"Career\", look for Officer/Resource/Wealth stars.\n\
         6. Consider the birth place if relevant for geographical or \
         directional advice.\n\
         7. Keep the tone mystical yet grounded and helpful.\n\
         8. Do not be fatalistic; always offer advice on how to improve luck \
         (e.g., \"Wear more blue,\" \"Travel north\").\n\
         \n\
         User's BaZi Data:\n\
         {context}",
        directive = language_directive(language),
        context = chart_context(chart, current_year),
    )
}

/// One-shot prompt for the structured daily fortune.
#[must_use]
pub fn fortune_prompt(chart: &BaziResult, language: Language, today: NaiveDate) -> String {
    let language_line = match language {
        Language::Zh => "Provide the content in simplified Chinese (简体中文).",
        Language::En => "Provide the content in English.",
    };
    format!(
        "Based on the BaZi profile below, generate a specialized \"Daily \
         Fortune\" for today ({today}).\n\
         {language_line}\n\
         \n\
         Return the result strictly in JSON format.\n\
         \n\
         Profile: {context}",
        today = today.format("%Y-%m-%d"),
        context = chart_context(chart, today.year()),
    )
}

/// Response schema for the daily fortune: all six fields required.
#[must_use]
pub fn fortune_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "score": {
                "type": "INTEGER",
                "description": "A score from 0 to 100 representing overall luck today."
            },
            "summary": {
                "type": "STRING",
                "description": "A one-sentence summary of the fortune."
            },
            "analysis": {
                "type": "STRING",
                "description": "A detailed paragraph analyzing the day's energy relative to the user's chart."
            },
            "advice": {
                "type": "STRING",
                "description": "Specific actionable advice for the day."
            },
            "luckyColor": {
                "type": "STRING",
                "description": "The lucky color for today."
            },
            "luckyDirection": {
                "type": "STRING",
                "description": "The lucky direction for today."
            }
        },
        "required": ["score", "summary", "analysis", "advice", "luckyColor", "luckyDirection"]
    })
}

/// Canned opening line shown before the first chat turn.
#[must_use]
pub fn greeting(chart: &BaziResult, language: Language) -> String {
    match language {
        Language::Zh => format!(
            "您好。我已经分析了您出生在{place}的八字。您的日主是{master}（{element}）。\
             今天我可以为您指引什么？您可以询问关于事业、财运或姻缘。",
            place = chart.birth_place,
            master = chart.day_master,
            element = chart.day_pillar.stem_element,
        ),
        Language::En => format!(
            "Greetings. I have analyzed your BaZi chart based on your birth in \
             {place}. Your Day Master is {master} ({element}). How may I guide \
             you today? You can ask about Career, Wealth, or Relationships.",
            place = chart.birth_place,
            master = chart.day_master,
            element = chart.day_pillar.stem_element,
        ),
    }
}
