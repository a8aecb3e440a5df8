use crate::{
    classify::Category,
    config::Locale,
    display::canvas::{Canvas, Ink, SCREEN_WIDTH},
};

/// Instructional text rendered beneath the icon, one string per supported
/// locale. These live on the rendering side on purpose: the classifier only
/// ever emits a category and the extracted message, never localized copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSet {
    pub en: &'static str,
    pub es: &'static str,
    pub fr: &'static str,
}

impl InstructionSet {
    pub fn for_locale(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Es => self.es,
            Locale::Fr => self.fr,
        }
    }
}

/// Resolved visual plan for one alert: which icon routine to run and which
/// instruction trio to print. Total over `Category`; `Unknown` always
/// resolves to the generic warning scene.
#[derive(Clone, Copy)]
pub struct SceneDescriptor {
    pub title: &'static str,
    pub icon: fn(&mut Canvas),
    pub instructions: InstructionSet,
}

pub fn select_scene(category: Category) -> SceneDescriptor {
    match category {
        Category::Flood => SceneDescriptor {
            title: "FLOOD",
            icon: draw_flood_icon,
            instructions: InstructionSet {
                en: "Move to higher ground",
                es: "Vaya a un lugar elevado",
                fr: "Rejoignez un terrain eleve",
            },
        },
        Category::Typhoon => SceneDescriptor {
            title: "TYPHOON",
            icon: draw_typhoon_icon,
            instructions: InstructionSet {
                en: "Stay indoors, away from windows",
                es: "Quedese dentro, lejos de ventanas",
                fr: "Restez a l'interieur, loin des fenetres",
            },
        },
        Category::Disease => SceneDescriptor {
            title: "DISEASE",
            icon: draw_disease_icon,
            instructions: InstructionSet {
                en: "Avoid contact, wash hands",
                es: "Evite el contacto, lavese las manos",
                fr: "Evitez les contacts, lavez-vous les mains",
            },
        },
        Category::Drought => SceneDescriptor {
            title: "DROUGHT",
            icon: draw_drought_icon,
            instructions: InstructionSet {
                en: "Conserve water",
                es: "Ahorre agua",
                fr: "Economisez l'eau",
            },
        },
        Category::Heatwave => SceneDescriptor {
            title: "HEATWAVE",
            icon: draw_heatwave_icon,
            instructions: InstructionSet {
                en: "Stay cool, drink water",
                es: "Mantengase fresco, beba agua",
                fr: "Restez au frais, buvez de l'eau",
            },
        },
        Category::Unknown => SceneDescriptor {
            title: "ALERT",
            icon: draw_generic_warning_icon,
            instructions: InstructionSet {
                en: "Follow official guidance",
                es: "Siga las indicaciones oficiales",
                fr: "Suivez les consignes officielles",
            },
        },
    }
}

// Icon routines draw into the top third of the panel. Shapes only: the
// e-paper driver has no image support.

const ICON_TOP: u32 = 24;
const ICON_MID_X: u32 = SCREEN_WIDTH / 2;

fn draw_flood_icon(canvas: &mut Canvas) {
    canvas.rect(ICON_MID_X - 20, ICON_TOP, 40, 28, Ink::Black, false);
    for row in 0..3 {
        let y = ICON_TOP + 36 + row * 8;
        canvas.line(ICON_MID_X - 28, y, ICON_MID_X + 28, y, Ink::Black);
    }
}

fn draw_typhoon_icon(canvas: &mut Canvas) {
    for ring in 0..3 {
        let inset = ring * 8;
        canvas.rect(
            ICON_MID_X - 24 + inset,
            ICON_TOP + inset,
            48 - inset * 2,
            48 - inset * 2,
            Ink::Black,
            false,
        );
    }
}

fn draw_disease_icon(canvas: &mut Canvas) {
    canvas.rect(ICON_MID_X - 6, ICON_TOP, 12, 48, Ink::Red, true);
    canvas.rect(ICON_MID_X - 24, ICON_TOP + 18, 48, 12, Ink::Red, true);
}

fn draw_drought_icon(canvas: &mut Canvas) {
    canvas.rect(ICON_MID_X - 12, ICON_TOP + 12, 24, 24, Ink::Black, false);
    for i in 0..4 {
        let offset = i * 12;
        canvas.line(
            ICON_MID_X - 18 + offset,
            ICON_TOP + 48,
            ICON_MID_X - 22 + offset,
            ICON_TOP + 58,
            Ink::Black,
        );
    }
}

fn draw_heatwave_icon(canvas: &mut Canvas) {
    canvas.rect(ICON_MID_X - 4, ICON_TOP, 8, 40, Ink::Black, false);
    canvas.rect(ICON_MID_X - 8, ICON_TOP + 40, 16, 16, Ink::Red, true);
}

fn draw_generic_warning_icon(canvas: &mut Canvas) {
    canvas.line(ICON_MID_X, ICON_TOP, ICON_MID_X - 26, ICON_TOP + 48, Ink::Red);
    canvas.line(ICON_MID_X, ICON_TOP, ICON_MID_X + 26, ICON_TOP + 48, Ink::Red);
    canvas.line(
        ICON_MID_X - 26,
        ICON_TOP + 48,
        ICON_MID_X + 26,
        ICON_TOP + 48,
        Ink::Red,
    );
    canvas.text(ICON_MID_X - 2, ICON_TOP + 36, "!", Ink::Red);
}

#[cfg(test)]
mod tests {
    use crate::{classify::Category, config::Locale, display::canvas::Canvas};

    use super::select_scene;

    const ALL_CATEGORIES: [Category; 6] = [
        Category::Flood,
        Category::Typhoon,
        Category::Disease,
        Category::Drought,
        Category::Heatwave,
        Category::Unknown,
    ];

    #[test]
    fn every_category_resolves_to_a_drawable_scene() {
        for category in ALL_CATEGORIES {
            let scene = select_scene(category);
            let mut canvas = Canvas::new();
            (scene.icon)(&mut canvas);
            assert!(
                !canvas.ops().is_empty(),
                "icon routine for {category:?} drew nothing"
            );
            assert!(!scene.title.is_empty());
        }
    }

    #[test]
    fn every_scene_carries_all_three_locales() {
        for category in ALL_CATEGORIES {
            let scene = select_scene(category);
            for locale in [Locale::En, Locale::Es, Locale::Fr] {
                assert!(!scene.instructions.for_locale(locale).is_empty());
            }
        }
    }

    #[test]
    fn unknown_category_gets_the_generic_warning_scene() {
        assert_eq!(select_scene(Category::Unknown).title, "ALERT");
    }
}
