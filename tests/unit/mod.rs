mod overview_dump;
