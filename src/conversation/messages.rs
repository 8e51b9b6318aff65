//! User-facing texts

pub const START: &str = "Привет! Я бот прогноза погоды для путешественников.\n\n\
Укажите города на своём маршруте и число дней, а я пришлю прогноз \
температуры, влажности, скорости ветра и вероятности осадков для каждого города.\n\n\
Чтобы начать, отправьте /weather. Список команд: /help.";

pub const HELP: &str = "Доступные команды:\n\
/start - приветствие и описание бота\n\
/help - эта справка\n\
/weather - прогноз погоды по маршруту\n\n\
После команды /weather введите названия городов через запятую, \
затем выберите количество дней прогноза (от 1 до 5).";

pub const CITIES_PROMPT: &str =
    "Введите список городов через запятую (например: Москва, Санкт-Петербург, Казань):";

pub const CITIES_EMPTY: &str = "Список городов не может быть пустым. Попробуйте снова.";

pub const DAYS_PROMPT: &str = "Введите количество дней для прогноза (от 1 до 5):";

pub const DAYS_INVALID: &str = "Пожалуйста, введите число от 1 до 5.";

pub const FORECAST_FAILED: &str = "Возникла ошибка при получении прогнозов погоды.\n\
Проверьте корректность введённых названий городов и наличие доступных запросов к AccuWeather API.";
