// ABOUTME: Response schemas for structured Gemini output
// ABOUTME: One schema per gateway call, in the OpenAPI subset the API accepts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use cookly_core::models::DietaryFilter;
use serde_json::{json, Value};

/// `{ingredients: string[]}`
pub fn fridge_analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "ingredients": {
                "type": "ARRAY",
                "items": { "type": "STRING", "description": "An identified ingredient" }
            }
        },
        "required": ["ingredients"]
    })
}

/// `{isValid: bool, invalidItems: string[]}`
pub fn ingredient_validation() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isValid": {
                "type": "BOOLEAN",
                "description": "Whether the entire list consists of plausible ingredients."
            },
            "invalidItems": {
                "type": "ARRAY",
                "description": "A list of items that are not considered valid food ingredients.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["isValid", "invalidItems"]
    })
}

/// `{isFood: bool, reason: string}`
pub fn image_validation() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isFood": {
                "type": "BOOLEAN",
                "description": "Whether the image contains identifiable food ingredients."
            },
            "reason": {
                "type": "STRING",
                "description": "The reason why the image is not suitable, or an empty string."
            }
        },
        "required": ["isFood", "reason"]
    })
}

/// `{translations: string[]}`
pub fn translations() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "translations": {
                "type": "ARRAY",
                "description": "An array of translated strings, in the same order as the input.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["translations"]
    })
}

/// `{recipes: Recipe[]}`, shared by generation and translation
pub fn recipes() -> Value {
    let restriction_keys: Vec<&str> = DietaryFilter::ALL.iter().map(DietaryFilter::key).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "recipes": {
                "type": "ARRAY",
                "description": "A list of recipe suggestions",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Recipe title" },
                        "description": { "type": "STRING", "description": "Short recipe description" },
                        "difficulty": {
                            "type": "STRING",
                            "description": "Difficulty rating, always in English",
                            "enum": ["Easy", "Medium", "Hard"]
                        },
                        "cuisine": {
                            "type": "STRING",
                            "description": "The primary cuisine type of the recipe.",
                            "nullable": true
                        },
                        "restrictions": {
                            "type": "ARRAY",
                            "description": "A list of dietary restriction keys applicable to the recipe.",
                            "items": { "type": "STRING", "enum": restriction_keys }
                        },
                        "prepTime": { "type": "INTEGER", "description": "Prep time in minutes" },
                        "activeCookingTime": { "type": "INTEGER", "description": "Active cooking time in minutes" },
                        "calories": { "type": "INTEGER", "description": "Calories per serving" },
                        "nutrition": {
                            "type": "OBJECT",
                            "description": "Nutritional information per serving.",
                            "properties": {
                                "protein": { "type": "INTEGER", "description": "Protein in grams" },
                                "fat": { "type": "INTEGER", "description": "Fat in grams" },
                                "carbohydrates": { "type": "INTEGER", "description": "Carbohydrates in grams" }
                            },
                            "required": ["protein", "fat", "carbohydrates"]
                        },
                        "ingredients": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING", "description": "Ingredient name" },
                                    "amount": {
                                        "type": "STRING",
                                        "description": "Quantity and unit for the ingredient, e.g., '2 cups', '100g'."
                                    },
                                    "isAvailable": {
                                        "type": "BOOLEAN",
                                        "description": "Is this ingredient available in the fridge?"
                                    }
                                },
                                "required": ["name", "amount", "isAvailable"]
                            }
                        },
                        "steps": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "text": { "type": "STRING", "description": "A single cooking step instruction." },
                                    "imagePrompt": {
                                        "type": "STRING",
                                        "description": "A prompt for generating an image for this step. Can be null.",
                                        "nullable": true
                                    },
                                    "imageUrl": {
                                        "type": "STRING",
                                        "description": "URL of an existing image for the step, if available.",
                                        "nullable": true
                                    }
                                },
                                "required": ["text"]
                            }
                        },
                        "imagePrompt": {
                            "type": "STRING",
                            "description": "A detailed prompt for generating a food photography image."
                        },
                        "imageUrl": {
                            "type": "STRING",
                            "description": "URL of an existing image for the recipe, if available.",
                            "nullable": true
                        }
                    },
                    "required": [
                        "name", "description", "difficulty", "prepTime", "calories",
                        "nutrition", "ingredients", "steps", "imagePrompt"
                    ]
                }
            }
        },
        "required": ["recipes"]
    })
}
