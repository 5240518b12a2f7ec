// ABOUTME: Supported interface languages and their user-facing message catalogs
// ABOUTME: Language codes double as the target language passed to the model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! Interface languages.
//!
//! Fourteen languages are supported. Unknown or missing codes resolve to
//! English. Recipe text itself is produced by the model in the active
//! language; the catalogs here only cover the assistant's own messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
    /// French
    Fr,
    /// German
    De,
    /// Italian
    It,
    /// Hindi
    Hi,
    /// Japanese
    Ja,
    /// Russian
    Ru,
    /// Portuguese
    Pt,
    /// Turkish
    Tr,
    /// Azerbaijani
    Az,
    /// Polish
    Pl,
    /// Chinese
    Zh,
    /// Arabic
    Ar,
}

impl Language {
    /// Every supported language, in menu order
    pub const ALL: [Self; 14] = [
        Self::En,
        Self::Es,
        Self::Fr,
        Self::De,
        Self::It,
        Self::Hi,
        Self::Ja,
        Self::Ru,
        Self::Pt,
        Self::Tr,
        Self::Az,
        Self::Pl,
        Self::Zh,
        Self::Ar,
    ];

    /// Two-letter code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Hi => "hi",
            Self::Ja => "ja",
            Self::Ru => "ru",
            Self::Pt => "pt",
            Self::Tr => "tr",
            Self::Az => "az",
            Self::Pl => "pl",
            Self::Zh => "zh",
            Self::Ar => "ar",
        }
    }

    /// Language name written in that language
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::De => "Deutsch",
            Self::It => "Italiano",
            Self::Hi => "हिन्दी",
            Self::Ja => "日本語",
            Self::Ru => "Русский",
            Self::Pt => "Português",
            Self::Tr => "Türkçe",
            Self::Az => "Azərbaycanca",
            Self::Pl => "Polski",
            Self::Zh => "中文",
            Self::Ar => "العربية",
        }
    }

    /// Exact code match, case-insensitive
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Parse a code, falling back to English for anything unsupported
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Message catalog for this language
    #[must_use]
    pub const fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Es => &ES,
            Self::Fr => &FR,
            Self::De => &DE,
            Self::It => &IT,
            Self::Hi => &HI,
            Self::Ja => &JA,
            Self::Ru => &RU,
            Self::Pt => &PT,
            Self::Tr => &TR,
            Self::Az => &AZ,
            Self::Pl => &PL,
            Self::Zh => &ZH,
            Self::Ar => &AR,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// User-facing messages for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// Recipe request failed
    pub error_fetch: &'static str,
    /// Fridge photo analysis failed
    pub error_analyze: &'static str,
    /// Photo rejected and the model gave no reason
    pub error_image_validation: &'static str,
    /// Prefix for the list of rejected ingredients
    pub error_invalid_ingredients: &'static str,
    /// Share link copied
    pub copied_to_clipboard: &'static str,
    /// Share link could not be created
    pub share_error: &'static str,
    /// Prefix for the shared recipe title
    pub share_title_prefix: &'static str,
    /// Search returned nothing
    pub no_recipes_found: &'static str,
    /// Favorites view is empty
    pub no_favorites: &'static str,
    /// Shopping list is empty
    pub shopping_list_empty: &'static str,
}

const EN: Messages = Messages {
    error_fetch: "Sorry, we couldn't get recipes right now. Please try again.",
    error_analyze: "We couldn't analyze the image. Please try another photo.",
    error_image_validation: "This image doesn't seem to contain food. Please upload a photo of your ingredients.",
    error_invalid_ingredients: "Some items don't look like ingredients:",
    copied_to_clipboard: "Link copied to clipboard!",
    share_error: "Could not share the recipe.",
    share_title_prefix: "Check out this recipe: ",
    no_recipes_found: "No recipes found. Try different ingredients or filters.",
    no_favorites: "You haven't saved any favorite recipes yet.",
    shopping_list_empty: "Your shopping list is empty.",
};

const ES: Messages = Messages {
    error_fetch: "Lo sentimos, no pudimos obtener recetas. Inténtalo de nuevo.",
    error_analyze: "No pudimos analizar la imagen. Prueba con otra foto.",
    error_image_validation: "Esta imagen no parece contener comida. Sube una foto de tus ingredientes.",
    error_invalid_ingredients: "Algunos elementos no parecen ingredientes:",
    copied_to_clipboard: "¡Enlace copiado al portapapeles!",
    share_error: "No se pudo compartir la receta.",
    share_title_prefix: "Mira esta receta: ",
    no_recipes_found: "No se encontraron recetas. Prueba otros ingredientes o filtros.",
    no_favorites: "Todavía no has guardado recetas favoritas.",
    shopping_list_empty: "Tu lista de la compra está vacía.",
};

const FR: Messages = Messages {
    error_fetch: "Désolé, impossible d'obtenir des recettes. Veuillez réessayer.",
    error_analyze: "Impossible d'analyser l'image. Essayez une autre photo.",
    error_image_validation: "Cette image ne semble pas contenir de nourriture. Envoyez une photo de vos ingrédients.",
    error_invalid_ingredients: "Certains éléments ne ressemblent pas à des ingrédients :",
    copied_to_clipboard: "Lien copié dans le presse-papiers !",
    share_error: "Impossible de partager la recette.",
    share_title_prefix: "Découvrez cette recette : ",
    no_recipes_found: "Aucune recette trouvée. Essayez d'autres ingrédients ou filtres.",
    no_favorites: "Vous n'avez encore enregistré aucune recette favorite.",
    shopping_list_empty: "Votre liste de courses est vide.",
};

const DE: Messages = Messages {
    error_fetch: "Leider konnten keine Rezepte geladen werden. Bitte versuche es erneut.",
    error_analyze: "Das Bild konnte nicht analysiert werden. Bitte versuche ein anderes Foto.",
    error_image_validation: "Dieses Bild scheint keine Lebensmittel zu enthalten. Bitte lade ein Foto deiner Zutaten hoch.",
    error_invalid_ingredients: "Einige Einträge sehen nicht wie Zutaten aus:",
    copied_to_clipboard: "Link in die Zwischenablage kopiert!",
    share_error: "Das Rezept konnte nicht geteilt werden.",
    share_title_prefix: "Schau dir dieses Rezept an: ",
    no_recipes_found: "Keine Rezepte gefunden. Versuche andere Zutaten oder Filter.",
    no_favorites: "Du hast noch keine Lieblingsrezepte gespeichert.",
    shopping_list_empty: "Deine Einkaufsliste ist leer.",
};

const IT: Messages = Messages {
    error_fetch: "Spiacenti, non è stato possibile ottenere ricette. Riprova.",
    error_analyze: "Non è stato possibile analizzare l'immagine. Prova con un'altra foto.",
    error_image_validation: "Questa immagine non sembra contenere cibo. Carica una foto dei tuoi ingredienti.",
    error_invalid_ingredients: "Alcuni elementi non sembrano ingredienti:",
    copied_to_clipboard: "Link copiato negli appunti!",
    share_error: "Impossibile condividere la ricetta.",
    share_title_prefix: "Guarda questa ricetta: ",
    no_recipes_found: "Nessuna ricetta trovata. Prova altri ingredienti o filtri.",
    no_favorites: "Non hai ancora salvato ricette preferite.",
    shopping_list_empty: "La tua lista della spesa è vuota.",
};

const HI: Messages = Messages {
    error_fetch: "क्षमा करें, अभी रेसिपी नहीं मिल सकीं। कृपया फिर से प्रयास करें।",
    error_analyze: "हम छवि का विश्लेषण नहीं कर सके। कृपया कोई दूसरी फ़ोटो आज़माएँ।",
    error_image_validation: "इस छवि में भोजन नहीं दिखता। कृपया अपनी सामग्री की फ़ोटो अपलोड करें।",
    error_invalid_ingredients: "कुछ चीज़ें सामग्री जैसी नहीं लगतीं:",
    copied_to_clipboard: "लिंक क्लिपबोर्ड पर कॉपी हो गया!",
    share_error: "रेसिपी साझा नहीं की जा सकी।",
    share_title_prefix: "यह रेसिपी देखें: ",
    no_recipes_found: "कोई रेसिपी नहीं मिली। अलग सामग्री या फ़िल्टर आज़माएँ।",
    no_favorites: "आपने अभी तक कोई पसंदीदा रेसिपी सहेजी नहीं है।",
    shopping_list_empty: "आपकी खरीदारी सूची खाली है।",
};

const JA: Messages = Messages {
    error_fetch: "申し訳ありません。レシピを取得できませんでした。もう一度お試しください。",
    error_analyze: "画像を解析できませんでした。別の写真をお試しください。",
    error_image_validation: "この画像には食材が写っていないようです。食材の写真をアップロードしてください。",
    error_invalid_ingredients: "食材ではないと思われる項目があります:",
    copied_to_clipboard: "リンクをクリップボードにコピーしました！",
    share_error: "レシピを共有できませんでした。",
    share_title_prefix: "このレシピをチェック: ",
    no_recipes_found: "レシピが見つかりませんでした。別の食材やフィルターをお試しください。",
    no_favorites: "お気に入りのレシピはまだありません。",
    shopping_list_empty: "買い物リストは空です。",
};

const RU: Messages = Messages {
    error_fetch: "Не удалось получить рецепты. Пожалуйста, попробуйте ещё раз.",
    error_analyze: "Не удалось проанализировать изображение. Попробуйте другое фото.",
    error_image_validation: "Похоже, на этом изображении нет продуктов. Загрузите фото ваших ингредиентов.",
    error_invalid_ingredients: "Некоторые элементы не похожи на ингредиенты:",
    copied_to_clipboard: "Ссылка скопирована в буфер обмена!",
    share_error: "Не удалось поделиться рецептом.",
    share_title_prefix: "Посмотрите этот рецепт: ",
    no_recipes_found: "Рецепты не найдены. Попробуйте другие ингредиенты или фильтры.",
    no_favorites: "У вас пока нет избранных рецептов.",
    shopping_list_empty: "Ваш список покупок пуст.",
};

const PT: Messages = Messages {
    error_fetch: "Desculpe, não foi possível obter receitas. Tente novamente.",
    error_analyze: "Não foi possível analisar a imagem. Tente outra foto.",
    error_image_validation: "Esta imagem não parece conter comida. Envie uma foto dos seus ingredientes.",
    error_invalid_ingredients: "Alguns itens não parecem ingredientes:",
    copied_to_clipboard: "Link copiado para a área de transferência!",
    share_error: "Não foi possível compartilhar a receita.",
    share_title_prefix: "Veja esta receita: ",
    no_recipes_found: "Nenhuma receita encontrada. Tente outros ingredientes ou filtros.",
    no_favorites: "Você ainda não salvou receitas favoritas.",
    shopping_list_empty: "Sua lista de compras está vazia.",
};

const TR: Messages = Messages {
    error_fetch: "Üzgünüz, tarifler alınamadı. Lütfen tekrar deneyin.",
    error_analyze: "Görsel analiz edilemedi. Lütfen başka bir fotoğraf deneyin.",
    error_image_validation: "Bu görselde yiyecek yok gibi görünüyor. Lütfen malzemelerinizin fotoğrafını yükleyin.",
    error_invalid_ingredients: "Bazı öğeler malzeme gibi görünmüyor:",
    copied_to_clipboard: "Bağlantı panoya kopyalandı!",
    share_error: "Tarif paylaşılamadı.",
    share_title_prefix: "Bu tarife göz atın: ",
    no_recipes_found: "Tarif bulunamadı. Farklı malzemeler veya filtreler deneyin.",
    no_favorites: "Henüz favori tarif kaydetmediniz.",
    shopping_list_empty: "Alışveriş listeniz boş.",
};

const AZ: Messages = Messages {
    error_fetch: "Təəssüf ki, reseptlər alınmadı. Yenidən cəhd edin.",
    error_analyze: "Şəkil təhlil edilə bilmədi. Başqa foto sınayın.",
    error_image_validation: "Bu şəkildə qida görünmür. Zəhmət olmasa inqrediyentlərinizin fotosunu yükləyin.",
    error_invalid_ingredients: "Bəzi elementlər inqrediyentə oxşamır:",
    copied_to_clipboard: "Keçid mübadilə buferinə kopyalandı!",
    share_error: "Resepti paylaşmaq mümkün olmadı.",
    share_title_prefix: "Bu reseptə baxın: ",
    no_recipes_found: "Resept tapılmadı. Başqa inqrediyentlər və ya filtrlər sınayın.",
    no_favorites: "Hələ sevimli resept yadda saxlamamısınız.",
    shopping_list_empty: "Alış-veriş siyahınız boşdur.",
};

const PL: Messages = Messages {
    error_fetch: "Niestety nie udało się pobrać przepisów. Spróbuj ponownie.",
    error_analyze: "Nie udało się przeanalizować zdjęcia. Spróbuj innego zdjęcia.",
    error_image_validation: "Na tym zdjęciu nie widać jedzenia. Prześlij zdjęcie swoich składników.",
    error_invalid_ingredients: "Niektóre pozycje nie wyglądają na składniki:",
    copied_to_clipboard: "Link skopiowany do schowka!",
    share_error: "Nie udało się udostępnić przepisu.",
    share_title_prefix: "Zobacz ten przepis: ",
    no_recipes_found: "Nie znaleziono przepisów. Spróbuj innych składników lub filtrów.",
    no_favorites: "Nie masz jeszcze ulubionych przepisów.",
    shopping_list_empty: "Twoja lista zakupów jest pusta.",
};

const ZH: Messages = Messages {
    error_fetch: "抱歉，暂时无法获取食谱。请重试。",
    error_analyze: "无法分析这张图片。请换一张照片试试。",
    error_image_validation: "这张图片似乎不包含食物。请上传食材的照片。",
    error_invalid_ingredients: "有些项目看起来不是食材：",
    copied_to_clipboard: "链接已复制到剪贴板！",
    share_error: "无法分享该食谱。",
    share_title_prefix: "看看这个食谱：",
    no_recipes_found: "未找到食谱。请尝试其他食材或筛选条件。",
    no_favorites: "您还没有收藏任何食谱。",
    shopping_list_empty: "您的购物清单是空的。",
};

const AR: Messages = Messages {
    error_fetch: "عذرًا، تعذّر الحصول على وصفات. يرجى المحاولة مرة أخرى.",
    error_analyze: "تعذّر تحليل الصورة. يرجى تجربة صورة أخرى.",
    error_image_validation: "يبدو أن هذه الصورة لا تحتوي على طعام. يرجى رفع صورة لمكوناتك.",
    error_invalid_ingredients: "بعض العناصر لا تبدو كمكونات:",
    copied_to_clipboard: "تم نسخ الرابط إلى الحافظة!",
    share_error: "تعذّرت مشاركة الوصفة.",
    share_title_prefix: "اطّلع على هذه الوصفة: ",
    no_recipes_found: "لم يتم العثور على وصفات. جرّب مكونات أو عوامل تصفية أخرى.",
    no_favorites: "لم تحفظ أي وصفات مفضلة بعد.",
    shopping_list_empty: "قائمة التسوق فارغة.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code("xx"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
        assert_eq!(Language::from_code("FR"), Language::Fr);
        assert_eq!(Language::parse("pt-BR"), None);
    }

    #[test]
    fn test_every_language_has_a_complete_catalog() {
        for lang in Language::ALL {
            let messages = lang.messages();
            assert_eq!(Language::from_code(lang.code()), lang);
            assert!(!messages.error_fetch.is_empty(), "{lang}");
            assert!(!messages.error_invalid_ingredients.is_empty(), "{lang}");
            assert!(!messages.share_title_prefix.is_empty(), "{lang}");
        }
    }
}
