/// Трейт для корня агрегата
///
/// Задаёт системное имя агрегата, из которого строится имя таблицы в БД
pub trait AggregateRoot {
    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для БД (например, "farmer_detail")
    fn collection_name() -> &'static str;

    /// Полное имя агрегата для системы (например, "a001_farmer_detail")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
